//! SubmitPrompt command handler.
//!
//! Drives one `/prompt` call: while onboarding is incomplete the prompt fills
//! the next intake field and a canned reply is returned. Afterwards the
//! prompt becomes a chat turn, the whole conversation is sent to the AI
//! provider, and the exchange is written back as a single history update.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::application::records::UserRecords;
use crate::application::user_locks::UserLocks;
use crate::domain::conversation::{
    ConversationHistory, ImageDirective, RetentionPolicy, SystemInstructions, Turn,
};
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::onboarding::{OnboardingOutcome, OnboardingRecord};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, ImageGenerator, KeyValueStore, Message,
    RequestMetadata, SamplingParams, StoreError,
};

/// Command to submit one prompt for a user.
#[derive(Debug, Clone)]
pub struct SubmitPromptCommand {
    pub user_id: UserId,
    pub prompt: String,
}

impl SubmitPromptCommand {
    /// Validates that both the user id and the prompt are non-empty.
    ///
    /// Whitespace-only prompts are accepted and stored verbatim.
    pub fn new(user_id: impl Into<String>, prompt: impl Into<String>) -> Result<Self, ValidationError> {
        let user_id = UserId::new(user_id)?;
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }
        Ok(Self { user_id, prompt })
    }
}

/// Outcome of a submitted prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPromptResult {
    /// Onboarding consumed the prompt; `message` asks for the next field.
    Onboarding { message: String },
    /// The model replied.
    Reply { user_id: UserId, response: String },
}

/// Errors that can occur when submitting a prompt.
#[derive(Debug, Error)]
pub enum SubmitPromptError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("AI provider error: {0}")]
    AIProvider(#[from] AIError),

    #[error("Image generation error: {0}")]
    ImageGeneration(#[source] AIError),
}

/// Handler for SubmitPrompt commands.
pub struct SubmitPromptHandler {
    records: UserRecords,
    ai_provider: Arc<dyn AIProvider>,
    image_generator: Option<Arc<dyn ImageGenerator>>,
    instructions: SystemInstructions,
    retention: RetentionPolicy,
    sampling: SamplingParams,
    locks: Arc<UserLocks>,
}

impl SubmitPromptHandler {
    /// Creates a handler with the dissertation persona, default retention
    /// and no image generation.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        ai_provider: Arc<dyn AIProvider>,
        locks: Arc<UserLocks>,
    ) -> Self {
        Self {
            records: UserRecords::new(store),
            ai_provider,
            image_generator: None,
            instructions: SystemInstructions::dissertation(),
            retention: RetentionPolicy::default(),
            sampling: SamplingParams::default(),
            locks,
        }
    }

    /// Enables the image branch. The directive instruction is added to the
    /// system messages of every request.
    pub fn with_image_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.image_generator = Some(generator);
        self
    }

    /// Replaces the base system instructions.
    pub fn with_instructions(mut self, instructions: SystemInstructions) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// System messages sent with every completion request.
    pub fn system_instructions(&self) -> SystemInstructions {
        match self.image_generator {
            Some(_) => self.instructions.clone().with_image_directives(),
            None => self.instructions.clone(),
        }
    }

    /// Handles a submit prompt command.
    pub async fn handle(
        &self,
        cmd: SubmitPromptCommand,
    ) -> Result<SubmitPromptResult, SubmitPromptError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let mut record = self.records.load_onboarding(&cmd.user_id).await?;
        let stage = record.stage();

        if let OnboardingOutcome::FieldRecorded { field, reply } = record.advance(&cmd.prompt)? {
            self.records.save_onboarding(&cmd.user_id, &record).await?;
            tracing::info!(
                user_id = %cmd.user_id,
                stage = %stage,
                field = %field,
                "onboarding field recorded"
            );
            return Ok(SubmitPromptResult::Onboarding {
                message: reply.to_string(),
            });
        }

        let mut history = self.records.load_history(&cmd.user_id).await?;
        history.push(Turn::user(cmd.prompt.as_str()));

        let request = self.build_request(&cmd.user_id, &record, &history);
        let completion = self.ai_provider.complete(request).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            model = %completion.model,
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            total_tokens = completion.usage.total_tokens,
            "completion received"
        );

        let response = self.attach_image(&completion.content).await?;

        history.push(Turn::assistant(completion.content));
        let dropped = history.apply_retention(self.retention);
        if dropped > 0 {
            tracing::debug!(user_id = %cmd.user_id, dropped, "history trimmed");
        }
        self.records.save_history(&cmd.user_id, &history).await?;

        Ok(SubmitPromptResult::Reply {
            user_id: cmd.user_id,
            response,
        })
    }

    /// System instructions, then the onboarding summary, then every stored turn.
    fn build_request(
        &self,
        user_id: &UserId,
        record: &OnboardingRecord,
        history: &ConversationHistory,
    ) -> CompletionRequest {
        let metadata = RequestMetadata::new(user_id.clone(), Uuid::new_v4().to_string());

        CompletionRequest::new(metadata)
            .with_messages(self.system_instructions().messages().iter().map(Message::system))
            .with_messages(std::iter::once(Message::user(record.summary())))
            .with_messages(history.turns().iter().map(Message::from))
            .with_sampling(self.sampling)
    }

    /// Replaces the first image directive with a generated image, if enabled.
    async fn attach_image(&self, content: &str) -> Result<String, SubmitPromptError> {
        let Some(generator) = &self.image_generator else {
            return Ok(content.to_string());
        };
        let Some(directive) = ImageDirective::find(content) else {
            return Ok(content.to_string());
        };

        let image = generator
            .generate(directive.prompt())
            .await
            .map_err(SubmitPromptError::ImageGeneration)?;

        Ok(directive.splice(content, &image.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError, MockImageGenerator};
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::onboarding::OnboardingField;
    use crate::ports::MessageRole;

    struct Fixture {
        store: Arc<InMemoryKeyValueStore>,
        provider: Arc<MockAIProvider>,
        handler: SubmitPromptHandler,
    }

    fn fixture(provider: MockAIProvider) -> Fixture {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let provider = Arc::new(provider);
        let handler =
            SubmitPromptHandler::new(store.clone(), provider.clone(), Arc::new(UserLocks::new()));
        Fixture {
            store,
            provider,
            handler,
        }
    }

    fn cmd(user: &str, prompt: &str) -> SubmitPromptCommand {
        SubmitPromptCommand::new(user, prompt).unwrap()
    }

    async fn onboard(handler: &SubmitPromptHandler, user: &str) {
        for prompt in ["AI ethics", "10", "Kenya"] {
            handler.handle(cmd(user, prompt)).await.unwrap();
        }
    }

    async fn stored_history(store: &InMemoryKeyValueStore, key: &str) -> Vec<Turn> {
        let raw = store.get(key).await.unwrap().unwrap_or_else(|| "[]".into());
        serde_json::from_str(&raw).unwrap()
    }

    mod command {
        use super::*;

        #[test]
        fn rejects_empty_user_id() {
            assert!(SubmitPromptCommand::new("", "hello").is_err());
        }

        #[test]
        fn rejects_empty_prompt() {
            assert!(SubmitPromptCommand::new("u1", "").is_err());
        }

        #[test]
        fn accepts_whitespace_prompt() {
            let cmd = SubmitPromptCommand::new("u1", "  ").unwrap();
            assert_eq!(cmd.prompt, "  ");
        }
    }

    mod onboarding {
        use super::*;

        #[tokio::test]
        async fn first_three_prompts_fill_fields_in_order() {
            let f = fixture(MockAIProvider::new());

            let mut replies = Vec::new();
            for prompt in ["AI ethics", "10", "Kenya"] {
                replies.push(f.handler.handle(cmd("u1", prompt)).await.unwrap());
            }

            let expected: Vec<_> = OnboardingField::ORDER
                .iter()
                .map(|field| SubmitPromptResult::Onboarding {
                    message: field.follow_up().to_string(),
                })
                .collect();
            assert_eq!(replies, expected);

            let raw = f.store.get("u1-data").await.unwrap().unwrap();
            let record: OnboardingRecord = serde_json::from_str(&raw).unwrap();
            assert_eq!(record, OnboardingRecord::completed("AI ethics", "10", "Kenya"));

            assert_eq!(f.provider.call_count(), 0);
            assert!(f.store.get("u1").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn canned_messages_match_wording() {
            let f = fixture(MockAIProvider::new());

            let r1 = f.handler.handle(cmd("u1", "AI ethics")).await.unwrap();
            let r2 = f.handler.handle(cmd("u1", "10")).await.unwrap();
            let r3 = f.handler.handle(cmd("u1", "Kenya")).await.unwrap();

            assert_eq!(
                r1,
                SubmitPromptResult::Onboarding {
                    message: "Great! How many pages do you need for the dissertation?".into()
                }
            );
            assert_eq!(
                r2,
                SubmitPromptResult::Onboarding {
                    message: "Got it! Which country are you from (for references)?".into()
                }
            );
            assert_eq!(
                r3,
                SubmitPromptResult::Onboarding {
                    message: "Perfect! Let’s start. Here’s your dissertation proposal:".into()
                }
            );
        }

        #[tokio::test]
        async fn out_of_order_record_fills_first_missing_field() {
            let f = fixture(MockAIProvider::new());
            f.store.set("u1-data", r#"{"pages":"12"}"#).await.unwrap();

            f.handler.handle(cmd("u1", "Climate")).await.unwrap();

            let raw = f.store.get("u1-data").await.unwrap().unwrap();
            assert_eq!(raw, r#"{"topic":"Climate","pages":"12"}"#);
        }

        #[tokio::test]
        async fn undecodable_record_fails_without_calling_provider() {
            let f = fixture(MockAIProvider::new());
            f.store.set("u1-data", "{oops").await.unwrap();

            let err = f.handler.handle(cmd("u1", "Hi")).await.unwrap_err();

            assert!(matches!(
                err,
                SubmitPromptError::Store(StoreError::DeserializationFailed { .. })
            ));
            assert_eq!(f.provider.call_count(), 0);
            assert_eq!(f.store.get("u1-data").await.unwrap().as_deref(), Some("{oops"));
        }
    }

    mod chat {
        use super::*;

        #[tokio::test]
        async fn reply_is_returned_and_exchange_stored() {
            let f = fixture(MockAIProvider::new().with_response("Here is your proposal."));
            onboard(&f.handler, "u1").await;

            let result = f.handler.handle(cmd("u1", "Hi")).await.unwrap();

            assert_eq!(
                result,
                SubmitPromptResult::Reply {
                    user_id: UserId::new("u1").unwrap(),
                    response: "Here is your proposal.".into(),
                }
            );
            assert_eq!(
                stored_history(&f.store, "u1").await,
                vec![Turn::user("Hi"), Turn::assistant("Here is your proposal.")]
            );
        }

        #[tokio::test]
        async fn message_list_is_instructions_summary_then_history() {
            let f = fixture(MockAIProvider::new());
            onboard(&f.handler, "u1").await;

            f.handler.handle(cmd("u1", "first")).await.unwrap();
            f.handler.handle(cmd("u1", "second")).await.unwrap();

            let request = f.provider.last_call().unwrap();
            let system = f.handler.system_instructions().len();
            assert_eq!(request.messages.len(), system + 1 + 3);

            assert!(request.messages[..system]
                .iter()
                .all(|m| m.role == MessageRole::System));
            assert_eq!(
                request.messages[system],
                Message::user("Topic: AI ethics, Pages: 10, Country: Kenya")
            );
            assert_eq!(request.messages[system + 1], Message::user("first"));
            assert_eq!(request.messages[system + 2].role, MessageRole::Assistant);
            assert_eq!(request.messages[system + 3], Message::user("second"));
            assert_eq!(request.metadata.user_id.as_str(), "u1");
        }

        #[tokio::test]
        async fn n_prompts_store_two_n_turns() {
            let f = fixture(MockAIProvider::new());
            onboard(&f.handler, "u1").await;

            for i in 0..5 {
                f.handler.handle(cmd("u1", &format!("q{}", i))).await.unwrap();
            }

            let turns = stored_history(&f.store, "u1").await;
            assert_eq!(turns.len(), 10);
            assert!(turns.iter().step_by(2).all(Turn::is_user));
        }

        #[tokio::test]
        async fn failed_inference_leaves_history_unchanged() {
            let f = fixture(
                MockAIProvider::new()
                    .with_response("one")
                    .with_error(MockError::Unavailable {
                        message: "down".into(),
                    }),
            );
            onboard(&f.handler, "u1").await;
            f.handler.handle(cmd("u1", "first")).await.unwrap();
            let before = f.store.get("u1").await.unwrap();

            let err = f.handler.handle(cmd("u1", "second")).await.unwrap_err();

            assert!(matches!(err, SubmitPromptError::AIProvider(AIError::Unavailable { .. })));
            assert_eq!(f.store.get("u1").await.unwrap(), before);
        }

        #[tokio::test]
        async fn store_failure_is_reported() {
            let f = fixture(MockAIProvider::new());
            f.store.fail_with("connection refused").await;

            let err = f.handler.handle(cmd("u1", "AI ethics")).await.unwrap_err();

            assert!(matches!(err, SubmitPromptError::Store(StoreError::Unavailable(_))));
        }

        #[tokio::test]
        async fn sampling_parameters_are_forwarded() {
            let sampling = SamplingParams {
                temperature: Some(0.7),
                max_tokens: Some(1500),
                top_p: Some(1.0),
                frequency_penalty: Some(0.0),
                presence_penalty: Some(0.0),
            };
            let mut f = fixture(MockAIProvider::new());
            f.handler = f.handler.with_sampling(sampling);
            onboard(&f.handler, "u1").await;

            f.handler.handle(cmd("u1", "Hi")).await.unwrap();

            assert_eq!(f.provider.last_call().unwrap().sampling, sampling);
        }

        #[tokio::test]
        async fn retention_keeps_window_starting_on_user_turn() {
            let mut f = fixture(MockAIProvider::new());
            f.handler = f.handler.with_retention(RetentionPolicy::MaxTurns(4));
            onboard(&f.handler, "u1").await;

            for i in 0..4 {
                f.handler.handle(cmd("u1", &format!("q{}", i))).await.unwrap();
            }

            let turns = stored_history(&f.store, "u1").await;
            assert_eq!(turns.len(), 4);
            assert_eq!(turns[0], Turn::user("q2"));
            assert_eq!(turns[2], Turn::user("q3"));
        }

        #[tokio::test]
        async fn concurrent_prompts_for_one_user_keep_every_turn() {
            let f = fixture(MockAIProvider::new().with_delay(std::time::Duration::from_millis(5)));
            onboard(&f.handler, "u1").await;
            let handler = Arc::new(f.handler);

            let tasks: Vec<_> = (0..8)
                .map(|i| {
                    let handler = Arc::clone(&handler);
                    tokio::spawn(async move { handler.handle(cmd("u1", &format!("q{}", i))).await })
                })
                .collect();
            for task in tasks {
                task.await.unwrap().unwrap();
            }

            assert_eq!(stored_history(&f.store, "u1").await.len(), 16);
        }

        #[tokio::test]
        async fn users_are_isolated() {
            let f = fixture(MockAIProvider::new());
            onboard(&f.handler, "alice").await;

            let result = f.handler.handle(cmd("bob", "Robotics")).await.unwrap();

            assert!(matches!(result, SubmitPromptResult::Onboarding { .. }));
            assert_eq!(f.provider.call_count(), 0);
        }
    }

    mod images {
        use super::*;

        fn with_images(provider: MockAIProvider, generator: MockImageGenerator) -> Fixture {
            let mut f = fixture(provider);
            f.handler = f.handler.with_image_generator(Arc::new(generator));
            f
        }

        #[tokio::test]
        async fn directive_is_replaced_in_response_only() {
            let generator = MockImageGenerator::new("https://img/chart.png");
            let f = with_images(
                MockAIProvider::new().with_response("See below.\n{{a bar chart}}\nDone."),
                generator.clone(),
            );
            onboard(&f.handler, "u1").await;

            let result = f.handler.handle(cmd("u1", "Hi")).await.unwrap();

            assert_eq!(
                result,
                SubmitPromptResult::Reply {
                    user_id: UserId::new("u1").unwrap(),
                    response: "See below.\n![a bar chart](https://img/chart.png)\nDone.".into(),
                }
            );
            assert_eq!(generator.prompts(), vec!["a bar chart".to_string()]);
            assert_eq!(
                stored_history(&f.store, "u1").await[1],
                Turn::assistant("See below.\n{{a bar chart}}\nDone.")
            );
        }

        #[tokio::test]
        async fn image_instruction_is_added_to_system_messages() {
            let f = with_images(MockAIProvider::new(), MockImageGenerator::default());
            onboard(&f.handler, "u1").await;

            f.handler.handle(cmd("u1", "Hi")).await.unwrap();

            let request = f.provider.last_call().unwrap();
            let system: Vec<_> = request
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::System)
                .collect();
            assert_eq!(system.len(), SystemInstructions::dissertation().len() + 1);
            assert_eq!(request.messages.len(), system.len() + 2);
        }

        #[tokio::test]
        async fn reply_without_directive_skips_generator() {
            let generator = MockImageGenerator::default();
            let f = with_images(MockAIProvider::new().with_response("Plain text"), generator.clone());
            onboard(&f.handler, "u1").await;

            f.handler.handle(cmd("u1", "Hi")).await.unwrap();

            assert!(generator.prompts().is_empty());
        }

        #[tokio::test]
        async fn generator_failure_persists_nothing() {
            let f = with_images(
                MockAIProvider::new().with_response("{{a map}}"),
                MockImageGenerator::failing(MockError::Unavailable {
                    message: "down".into(),
                }),
            );
            onboard(&f.handler, "u1").await;

            let err = f.handler.handle(cmd("u1", "Hi")).await.unwrap_err();

            assert!(matches!(err, SubmitPromptError::ImageGeneration(_)));
            assert!(f.store.get("u1").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn directives_are_left_alone_when_disabled() {
            let f = fixture(MockAIProvider::new().with_response("{{a map}}"));
            onboard(&f.handler, "u1").await;

            let result = f.handler.handle(cmd("u1", "Hi")).await.unwrap();

            assert!(matches!(
                result,
                SubmitPromptResult::Reply { ref response, .. } if response == "{{a map}}"
            ));
        }
    }
}
