//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI chat and image providers, plus mocks
//! - `storage` - Redis and in-memory key-value stores
//! - `http` - Axum routes and handlers

pub mod ai;
pub mod http;
pub mod storage;
