//! Scripted AI provider for tests.
//!
//! Replies are consumed in the order they were queued. Once the script runs
//! out the provider echoes the last user message, so tests that only care
//! about history bookkeeping need no setup.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Here is your outline.")
//!     .with_error(MockError::Timeout { timeout_secs: 120 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

const MOCK_MODEL: &str = "mock-model-1";

/// One queued outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Reply(String),
    Error(MockError),
}

/// Failures the mocks can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContextTooLong,
    Unavailable { message: String },
    AuthenticationFailed,
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContextTooLong => {
                AIError::ContextTooLong("maximum context length exceeded".to_string())
            }
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

/// In-process `AIProvider` that records every request it sees.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Reply(content.into()))
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sleeps this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn push(self, response: MockResponse) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    fn echo(request: &CompletionRequest) -> String {
        let last_user = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        format!("Mock reply to: {}", last_user)
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let scripted = self.script.lock().unwrap().pop_front();
        let content = match scripted {
            Some(MockResponse::Reply(content)) => Ok(content),
            Some(MockResponse::Error(err)) => Err(AIError::from(err)),
            None => Ok(Self::echo(&request)),
        };
        self.requests.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(CompletionResponse {
            content: content?,
            usage: TokenUsage::new(10, 20),
            model: MOCK_MODEL.to_string(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", MOCK_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(UserId::new("u1").unwrap(), "trace"))
            .with_message(MessageRole::System, "persona")
            .with_message(MessageRole::User, text)
    }

    #[tokio::test]
    async fn script_is_consumed_in_order_then_echoes() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_error(MockError::AuthenticationFailed);

        let first = provider.complete(request("a")).await.unwrap();
        let second = provider.complete(request("b")).await;
        let third = provider.complete(request("c")).await.unwrap();

        assert_eq!(first.content, "first");
        assert!(matches!(second, Err(AIError::AuthenticationFailed)));
        assert_eq!(third.content, "Mock reply to: c");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockAIProvider::new();
        assert!(provider.last_call().is_none());

        provider.complete(request("outline please")).await.unwrap();

        let seen = provider.last_call().unwrap();
        assert_eq!(seen.messages.len(), 2);
        assert_eq!(seen.messages[1].content, "outline please");
    }

    #[tokio::test]
    async fn clones_share_script_and_history() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        assert_eq!(clone.complete(request("x")).await.unwrap().content, "shared");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(30));
        let start = std::time::Instant::now();

        provider.complete(request("x")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn mock_errors_map_to_ai_errors() {
        assert!(matches!(
            AIError::from(MockError::ContextTooLong),
            AIError::ContextTooLong(_)
        ));
        assert!(AIError::from(MockError::RateLimited { retry_after_secs: 3 }).is_transient());
        assert!(matches!(
            AIError::from(MockError::Timeout { timeout_secs: 9 }),
            AIError::Timeout { timeout_secs: 9 }
        ));
    }
}
