//! Axum routes for the prompt endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{clear_conversation, health, submit_prompt, PromptAppState};

/// Creates the router.
///
/// Endpoints:
/// - POST /prompt - Onboarding step or chat turn
/// - DELETE /clear-conversation/:user_id - Delete both stored records
/// - GET /health - Liveness probe
pub fn prompt_router() -> Router<PromptAppState> {
    Router::new()
        .route("/prompt", post(submit_prompt))
        .route("/clear-conversation/:user_id", delete(clear_conversation))
        .route("/health", get(health))
}
