//! Conversation history configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::conversation::RetentionPolicy;

/// Conversation history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Most turns kept per user; oldest are dropped first
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,
}

impl ConversationConfig {
    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::MaxTurns(self.max_history_turns)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_history_turns < RetentionPolicy::MIN_TURNS {
            return Err(ValidationError::HistoryLimitTooSmall {
                min: RetentionPolicy::MIN_TURNS,
                value: self.max_history_turns,
            });
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_history_turns: default_max_history_turns(),
        }
    }
}

fn default_max_history_turns() -> usize {
    200
}
