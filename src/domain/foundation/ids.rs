//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Suffix appended to a user id to form the onboarding record key.
const ONBOARDING_KEY_SUFFIX: &str = "-data";

/// User identifier as supplied by the client.
///
/// Used verbatim as the conversation history key and, with a `-data`
/// suffix, as the onboarding record key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store key holding this user's conversation history.
    pub fn history_key(&self) -> String {
        self.0.clone()
    }

    /// Store key holding this user's onboarding record.
    pub fn onboarding_key(&self) -> String {
        format!("{}{}", self.0, ONBOARDING_KEY_SUFFIX)
    }

    /// The id with every trailing `-data` removed.
    ///
    /// Ids that can reach each other's store keys (`x` and `x-data` share
    /// the key `x-data`) have the same lock key.
    pub fn lock_key(&self) -> &str {
        let mut base = self.0.as_str();
        while let Some(stripped) = base.strip_suffix(ONBOARDING_KEY_SUFFIX) {
            base = stripped;
        }
        base
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn user_id_keeps_whitespace_verbatim() {
        let id = UserId::new(" u1 ").unwrap();
        assert_eq!(id.as_str(), " u1 ");
    }

    #[test]
    fn store_keys_follow_user_id() {
        let id = UserId::new("u1").unwrap();
        assert_eq!(id.history_key(), "u1");
        assert_eq!(id.onboarding_key(), "u1-data");
    }

    #[test]
    fn colliding_ids_share_a_lock_key() {
        let base = UserId::new("x").unwrap();
        let suffixed = UserId::new("x-data").unwrap();
        let doubled = UserId::new("x-data-data").unwrap();

        assert_eq!(base.onboarding_key(), suffixed.history_key());
        assert_eq!(base.lock_key(), "x");
        assert_eq!(suffixed.lock_key(), "x");
        assert_eq!(doubled.lock_key(), "x");
        assert_eq!(UserId::new("-data").unwrap().lock_key(), "");
        assert_eq!(UserId::new("x-database").unwrap().lock_key(), "x-database");
    }

    #[test]
    fn user_id_deserializes_from_plain_string() {
        let id: UserId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");

        let empty: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(empty.is_err());
    }
}
