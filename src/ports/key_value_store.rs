//! Key-Value Store Port - Interface for the conversation store.
//!
//! Values are opaque strings; callers own the (JSON) encoding. This mirrors
//! the string-serialized contract of the Redis deployment.

use async_trait::async_trait;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store command failed: {0}")]
    CommandFailed(String),

    #[error("Failed to serialize value for key '{key}': {reason}")]
    SerializationFailed { key: String, reason: String },

    #[error("Failed to deserialize value for key '{key}': {reason}")]
    DeserializationFailed { key: String, reason: String },
}

/// Port for string key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    ///
    /// # Returns
    /// `None` if the key does not exist
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, overwriting unconditionally
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`
    ///
    /// Idempotent: removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
