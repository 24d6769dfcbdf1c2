//! Conversation history and its retention policy.

use serde::{Deserialize, Serialize};

use super::turn::Turn;

/// Ordered turns stored under the user's id.
///
/// Serialized transparently as a JSON array of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drops the oldest turns so that at most `policy` allows remain.
    ///
    /// The retained window always starts on a user turn. Returns the number
    /// of turns removed.
    pub fn apply_retention(&mut self, policy: RetentionPolicy) -> usize {
        let Some(max) = policy.max_turns() else {
            return 0;
        };
        if self.turns.len() <= max {
            return 0;
        }

        let mut cut = self.turns.len() - max;
        while cut < self.turns.len() && !self.turns[cut].is_user() {
            cut += 1;
        }
        self.turns.drain(..cut);
        cut
    }
}

/// How many stored turns a user's history may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Keep at most this many turns, oldest dropped first.
    MaxTurns(usize),
    /// Keep everything.
    Unbounded,
}

impl RetentionPolicy {
    /// Smallest limit that still holds one full exchange.
    pub const MIN_TURNS: usize = 2;

    pub fn max_turns(&self) -> Option<usize> {
        match self {
            RetentionPolicy::MaxTurns(max) => Some((*max).max(Self::MIN_TURNS)),
            RetentionPolicy::Unbounded => None,
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy::MaxTurns(200)
    }
}
