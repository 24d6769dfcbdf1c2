//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types and the state machine trait
//! that form the vocabulary of the assistant domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::UserId;
pub use state_machine::StateMachine;
