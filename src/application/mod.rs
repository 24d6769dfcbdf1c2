//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod records;
mod user_locks;

pub use handlers::{
    ClearConversationCommand, ClearConversationError, ClearConversationHandler,
    SubmitPromptCommand, SubmitPromptError, SubmitPromptHandler, SubmitPromptResult,
};
pub use records::UserRecords;
pub use user_locks::{UserLockGuard, UserLocks};
