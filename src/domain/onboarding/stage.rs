//! Onboarding stage - which field the intake flow is waiting for.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// One of the three fields collected before any model call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingField {
    Topic,
    Pages,
    Country,
}

impl OnboardingField {
    /// All fields in collection order.
    pub const ORDER: [OnboardingField; 3] = [
        OnboardingField::Topic,
        OnboardingField::Pages,
        OnboardingField::Country,
    ];

    /// Canned reply sent right after this field has been recorded.
    pub fn follow_up(&self) -> &'static str {
        match self {
            OnboardingField::Topic => "Great! How many pages do you need for the dissertation?",
            OnboardingField::Pages => "Got it! Which country are you from (for references)?",
            OnboardingField::Country => "Perfect! Let’s start. Here’s your dissertation proposal:",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingField::Topic => "topic",
            OnboardingField::Pages => "pages",
            OnboardingField::Country => "country",
        }
    }
}

impl fmt::Display for OnboardingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a user's onboarding.
///
/// Progresses forward only: AwaitingTopic → AwaitingPages → AwaitingCountry
/// → Complete. A record edited out of band may skip stages, so any forward
/// move is a valid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    #[default]
    AwaitingTopic,
    AwaitingPages,
    AwaitingCountry,
    Complete,
}

impl OnboardingStage {
    const ALL: [OnboardingStage; 4] = [
        OnboardingStage::AwaitingTopic,
        OnboardingStage::AwaitingPages,
        OnboardingStage::AwaitingCountry,
        OnboardingStage::Complete,
    ];

    fn ordinal(&self) -> usize {
        match self {
            OnboardingStage::AwaitingTopic => 0,
            OnboardingStage::AwaitingPages => 1,
            OnboardingStage::AwaitingCountry => 2,
            OnboardingStage::Complete => 3,
        }
    }

    /// The field this stage is waiting for, or `None` once complete.
    pub fn pending_field(&self) -> Option<OnboardingField> {
        match self {
            OnboardingStage::AwaitingTopic => Some(OnboardingField::Topic),
            OnboardingStage::AwaitingPages => Some(OnboardingField::Pages),
            OnboardingStage::AwaitingCountry => Some(OnboardingField::Country),
            OnboardingStage::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        *self == OnboardingStage::Complete
    }
}

impl StateMachine for OnboardingStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        target.ordinal() > self.ordinal()
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|stage| self.can_transition_to(stage))
            .collect()
    }
}

impl fmt::Display for OnboardingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OnboardingStage::AwaitingTopic => "awaiting_topic",
            OnboardingStage::AwaitingPages => "awaiting_pages",
            OnboardingStage::AwaitingCountry => "awaiting_country",
            OnboardingStage::Complete => "complete",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_only_move_forward() {
        use OnboardingStage::*;
        assert!(AwaitingTopic.can_transition_to(&AwaitingPages));
        assert!(AwaitingTopic.can_transition_to(&AwaitingCountry));
        assert!(AwaitingCountry.can_transition_to(&Complete));
        assert!(!AwaitingPages.can_transition_to(&AwaitingTopic));
        assert!(!AwaitingPages.can_transition_to(&AwaitingPages));
    }

    #[test]
    fn complete_is_the_only_terminal_stage() {
        assert!(OnboardingStage::Complete.is_terminal());
        assert!(!OnboardingStage::AwaitingCountry.is_terminal());
        assert_eq!(
            OnboardingStage::AwaitingCountry.valid_transitions(),
            vec![OnboardingStage::Complete]
        );
    }

    #[test]
    fn pending_field_follows_collection_order() {
        let fields: Vec<_> = OnboardingStage::ALL
            .iter()
            .filter_map(|s| s.pending_field())
            .collect();
        assert_eq!(fields, OnboardingField::ORDER.to_vec());
    }

    #[test]
    fn follow_up_messages_are_verbatim() {
        assert!(OnboardingField::Topic.follow_up().starts_with("Great! How many pages"));
        assert!(OnboardingField::Pages.follow_up().starts_with("Got it! Which country"));
        assert!(OnboardingField::Country.follow_up().starts_with("Perfect! Let’s start."));
    }
}
