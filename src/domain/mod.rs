//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, errors, state machine trait)
//! - `onboarding` - Topic/pages/country intake that gates the chat flow
//! - `conversation` - Stored turns, retention policy, system instructions

pub mod conversation;
pub mod foundation;
pub mod onboarding;
