//! Onboarding record - the three intake fields stored under `{userId}-data`.

use serde::{Deserialize, Serialize};

use super::stage::{OnboardingField, OnboardingStage};
use crate::domain::foundation::{StateMachine, ValidationError};

/// Intake fields collected one prompt at a time.
///
/// Serialized as a JSON object; unset fields are omitted so that records
/// written by older deployments (`{}`, `{"topic": "..."}`) read back as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Result of feeding one prompt to the onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingOutcome {
    /// The prompt was stored in `field`; `reply` goes back to the user.
    FieldRecorded {
        field: OnboardingField,
        reply: &'static str,
    },
    /// All fields were already set; the prompt is a chat turn.
    Finished,
}

impl OnboardingRecord {
    /// Creates a record with every field set.
    pub fn completed(
        topic: impl Into<String>,
        pages: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            topic: Some(topic.into()),
            pages: Some(pages.into()),
            country: Some(country.into()),
        }
    }

    pub fn get(&self, field: OnboardingField) -> Option<&str> {
        match field {
            OnboardingField::Topic => self.topic.as_deref(),
            OnboardingField::Pages => self.pages.as_deref(),
            OnboardingField::Country => self.country.as_deref(),
        }
    }

    fn slot(&mut self, field: OnboardingField) -> &mut Option<String> {
        match field {
            OnboardingField::Topic => &mut self.topic,
            OnboardingField::Pages => &mut self.pages,
            OnboardingField::Country => &mut self.country,
        }
    }

    /// A field holding an empty string counts as unset.
    fn is_set(&self, field: OnboardingField) -> bool {
        self.get(field).map_or(false, |value| !value.is_empty())
    }

    /// Current stage: the first unset field in collection order.
    pub fn stage(&self) -> OnboardingStage {
        match OnboardingField::ORDER
            .iter()
            .find(|field| !self.is_set(**field))
        {
            Some(OnboardingField::Topic) => OnboardingStage::AwaitingTopic,
            Some(OnboardingField::Pages) => OnboardingStage::AwaitingPages,
            Some(OnboardingField::Country) => OnboardingStage::AwaitingCountry,
            None => OnboardingStage::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stage().is_complete()
    }

    /// Stores `prompt` verbatim into the first unset field.
    ///
    /// A field that is already set is never overwritten. Once every field
    /// is set the record is inert and [`OnboardingOutcome::Finished`] is
    /// returned without modification.
    pub fn advance(&mut self, prompt: &str) -> Result<OnboardingOutcome, ValidationError> {
        let current = self.stage();
        let Some(field) = current.pending_field() else {
            return Ok(OnboardingOutcome::Finished);
        };

        *self.slot(field) = Some(prompt.to_string());

        current.transition_to(self.stage())?;

        Ok(OnboardingOutcome::FieldRecorded {
            field,
            reply: field.follow_up(),
        })
    }

    /// Synthetic user message sent ahead of the stored history.
    pub fn summary(&self) -> String {
        format!(
            "Topic: {}, Pages: {}, Country: {}",
            self.topic.as_deref().unwrap_or_default(),
            self.pages.as_deref().unwrap_or_default(),
            self.country.as_deref().unwrap_or_default(),
        )
    }
}
