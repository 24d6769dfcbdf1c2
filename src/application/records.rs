//! Typed access to a user's two stored records.
//!
//! `{userId}-data` holds the onboarding record and `{userId}` holds the
//! conversation history, both as JSON text.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::conversation::ConversationHistory;
use crate::domain::foundation::UserId;
use crate::domain::onboarding::OnboardingRecord;
use crate::ports::{KeyValueStore, StoreError};

/// JSON codec over a [`KeyValueStore`].
#[derive(Clone)]
pub struct UserRecords {
    store: Arc<dyn KeyValueStore>,
}

impl UserRecords {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the onboarding record; a missing key is an empty record.
    pub async fn load_onboarding(&self, user_id: &UserId) -> Result<OnboardingRecord, StoreError> {
        Ok(self
            .load(&user_id.onboarding_key())
            .await?
            .unwrap_or_default())
    }

    pub async fn save_onboarding(
        &self,
        user_id: &UserId,
        record: &OnboardingRecord,
    ) -> Result<(), StoreError> {
        self.save(&user_id.onboarding_key(), record).await
    }

    /// Loads the history; a missing key is an empty history.
    pub async fn load_history(&self, user_id: &UserId) -> Result<ConversationHistory, StoreError> {
        Ok(self.load(&user_id.history_key()).await?.unwrap_or_default())
    }

    pub async fn save_history(
        &self,
        user_id: &UserId,
        history: &ConversationHistory,
    ) -> Result<(), StoreError> {
        self.save(&user_id.history_key(), history).await
    }

    /// Deletes both records. Missing keys are not an error.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), StoreError> {
        self.store.delete(&user_id.history_key()).await?;
        self.store.delete(&user_id.onboarding_key()).await
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::DeserializationFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::SerializationFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(key, &raw).await
    }
}
