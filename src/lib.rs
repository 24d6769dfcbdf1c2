//! Dissertation Assistant - conversational dissertation planning service.
//!
//! Collects a topic, page count and country from each user, then relays the
//! conversation to an OpenAI-compatible chat API. Per-user state lives in a
//! key-value store (Redis in production).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
