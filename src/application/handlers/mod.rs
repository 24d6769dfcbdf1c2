//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod clear_conversation;
mod submit_prompt;

pub use clear_conversation::{
    ClearConversationCommand, ClearConversationError, ClearConversationHandler,
};
pub use submit_prompt::{
    SubmitPromptCommand, SubmitPromptError, SubmitPromptHandler, SubmitPromptResult,
};
