//! Request and response bodies for the prompt endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /prompt`.
///
/// Every field is optional at the JSON level so that a missing field reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    /// Accepted for compatibility; onboarding reads the page count from `prompt`.
    #[serde(default)]
    pub pages: Option<serde_json::Value>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Reply while onboarding is still collecting fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply carrying the model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub user_id: String,
    pub response: String,
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_request_reads_camel_case() {
        let body: PromptRequest =
            serde_json::from_str(r#"{"userId":"u1","prompt":"Hi","pages":10}"#).unwrap();

        assert_eq!(body.user_id.as_deref(), Some("u1"));
        assert_eq!(body.prompt.as_deref(), Some("Hi"));
        assert!(body.pages.is_some());
    }

    #[test]
    fn prompt_request_tolerates_missing_fields() {
        let body: PromptRequest = serde_json::from_str("{}").unwrap();
        assert!(body.user_id.is_none());
        assert!(body.prompt.is_none());
    }

    #[test]
    fn chat_response_writes_camel_case() {
        let json = serde_json::to_value(ChatResponse {
            user_id: "u1".into(),
            response: "Hello".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"userId": "u1", "response": "Hello"}));
    }
}
