//! ClearConversation command handler.
//!
//! Deletes both stored records for a user so the next prompt restarts
//! onboarding from the topic question.

use std::sync::Arc;
use thiserror::Error;

use crate::application::records::UserRecords;
use crate::application::user_locks::UserLocks;
use crate::domain::foundation::{UserId, ValidationError};
use crate::ports::{KeyValueStore, StoreError};

/// Command to clear a user's conversation.
#[derive(Debug, Clone)]
pub struct ClearConversationCommand {
    pub user_id: UserId,
}

impl ClearConversationCommand {
    pub fn new(user_id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
        })
    }
}

/// Errors that can occur when clearing a conversation.
#[derive(Debug, Error)]
pub enum ClearConversationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Handler for ClearConversation commands.
pub struct ClearConversationHandler {
    records: UserRecords,
    locks: Arc<UserLocks>,
}

impl ClearConversationHandler {
    pub fn new(store: Arc<dyn KeyValueStore>, locks: Arc<UserLocks>) -> Self {
        Self {
            records: UserRecords::new(store),
            locks,
        }
    }

    /// Removes the history and onboarding records. Idempotent.
    pub async fn handle(&self, cmd: ClearConversationCommand) -> Result<UserId, ClearConversationError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        self.records.clear(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, "conversation cleared");

        Ok(cmd.user_id)
    }
}
