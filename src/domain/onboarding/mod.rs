//! Onboarding - the three-step intake (topic, pages, country) that gates chat.

mod record;
mod stage;

pub use record::{OnboardingOutcome, OnboardingRecord};
pub use stage::{OnboardingField, OnboardingStage};
