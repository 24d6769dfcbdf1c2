//! HTTP handlers for the prompt endpoints.
//!
//! These handlers connect Axum routes to application layer operations.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    ClearConversationCommand, ClearConversationError, ClearConversationHandler,
    SubmitPromptCommand, SubmitPromptError, SubmitPromptHandler, SubmitPromptResult,
};

use super::dto::{ChatResponse, ErrorResponse, HealthResponse, MessageResponse, PromptRequest};

pub const MISSING_FIELDS_MESSAGE: &str = "User ID and prompt are required.";
pub const PROMPT_FAILED_MESSAGE: &str = "An error occurred while processing your request.";
pub const CLEAR_FAILED_MESSAGE: &str = "An error occurred while clearing the conversation.";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for prompt handlers.
#[derive(Clone)]
pub struct PromptAppState {
    pub submit_prompt: Arc<SubmitPromptHandler>,
    pub clear_conversation: Arc<ClearConversationHandler>,
}

impl PromptAppState {
    pub fn new(submit_prompt: SubmitPromptHandler, clear_conversation: ClearConversationHandler) -> Self {
        Self {
            submit_prompt: Arc::new(submit_prompt),
            clear_conversation: Arc::new(clear_conversation),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /prompt
// ════════════════════════════════════════════════════════════════════════════════

/// POST /prompt - Advance onboarding or chat with the model.
///
/// # Responses
/// - 200 `{"message": ...}` while onboarding
/// - 200 `{"userId": ..., "response": ...}` once onboarding is complete
/// - 400 when `userId` or `prompt` is missing or empty
/// - 500 on any store or provider failure
pub async fn submit_prompt(
    State(state): State<PromptAppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Response, PromptApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected prompt body");
        PromptApiError::BadRequest(MISSING_FIELDS_MESSAGE)
    })?;

    let cmd = SubmitPromptCommand::new(
        body.user_id.unwrap_or_default(),
        body.prompt.unwrap_or_default(),
    )
    .map_err(|_| PromptApiError::BadRequest(MISSING_FIELDS_MESSAGE))?;

    let response = match state.submit_prompt.handle(cmd).await? {
        SubmitPromptResult::Onboarding { message } => {
            (StatusCode::OK, Json(MessageResponse::new(message))).into_response()
        }
        SubmitPromptResult::Reply { user_id, response } => (
            StatusCode::OK,
            Json(ChatResponse {
                user_id: user_id.into(),
                response,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

// ════════════════════════════════════════════════════════════════════════════════
// DELETE /clear-conversation/:user_id
// ════════════════════════════════════════════════════════════════════════════════

/// DELETE /clear-conversation/:user_id - Forget everything about a user.
///
/// Idempotent: succeeds even when nothing is stored.
pub async fn clear_conversation(
    State(state): State<PromptAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, PromptApiError> {
    let cmd = ClearConversationCommand::new(user_id)
        .map_err(|_| PromptApiError::BadRequest(MISSING_FIELDS_MESSAGE))?;

    let user_id = state.clear_conversation.handle(cmd).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new(format!(
            "Conversation cleared for user {}.",
            user_id
        ))),
    ))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /health
// ════════════════════════════════════════════════════════════════════════════════

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
///
/// Failure details are logged and never sent to the client.
#[derive(Debug)]
pub enum PromptApiError {
    BadRequest(&'static str),
    PromptFailed(String),
    ClearFailed(String),
}

impl From<SubmitPromptError> for PromptApiError {
    fn from(err: SubmitPromptError) -> Self {
        match err {
            SubmitPromptError::Validation(_) => PromptApiError::BadRequest(MISSING_FIELDS_MESSAGE),
            SubmitPromptError::AIProvider(ref e) | SubmitPromptError::ImageGeneration(ref e) => {
                tracing::warn!(transient = e.is_transient(), "provider call failed");
                PromptApiError::PromptFailed(err.to_string())
            }
            SubmitPromptError::Store(_) => PromptApiError::PromptFailed(err.to_string()),
        }
    }
}

impl From<ClearConversationError> for PromptApiError {
    fn from(err: ClearConversationError) -> Self {
        PromptApiError::ClearFailed(err.to_string())
    }
}

impl IntoResponse for PromptApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            PromptApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            PromptApiError::PromptFailed(detail) => {
                tracing::error!(error = %detail, "prompt failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(PROMPT_FAILED_MESSAGE),
                )
            }
            PromptApiError::ClearFailed(detail) => {
                tracing::error!(error = %detail, "clear conversation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(CLEAR_FAILED_MESSAGE),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{AIError, StoreError};

    #[test]
    fn validation_error_maps_to_bad_request() {
        let err: PromptApiError = SubmitPromptError::Validation(
            crate::domain::foundation::ValidationError::empty_field("prompt"),
        )
        .into();
        assert!(matches!(err, PromptApiError::BadRequest(MISSING_FIELDS_MESSAGE)));
    }

    #[test]
    fn downstream_errors_map_to_internal() {
        let err: PromptApiError = SubmitPromptError::AIProvider(AIError::AuthenticationFailed).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: PromptApiError =
            SubmitPromptError::Store(StoreError::Unavailable("down".into())).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: PromptApiError =
            ClearConversationError::Store(StoreError::Unavailable("down".into())).into();
        assert!(matches!(err, PromptApiError::ClearFailed(_)));
    }
}
