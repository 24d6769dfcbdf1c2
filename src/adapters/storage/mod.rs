//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! ## Available Adapters
//!
//! - **RedisKeyValueStore** - Redis over a multiplexed async connection (production)
//! - **InMemoryKeyValueStore** - HashMap behind a lock (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryKeyValueStore, RedisKeyValueStore};
//!
//! // Production
//! let store = RedisKeyValueStore::connect("redis://127.0.0.1:6379", timeout).await?;
//!
//! // Testing
//! let store = InMemoryKeyValueStore::new();
//! ```

mod in_memory_store;
mod redis_store;

pub use in_memory_store::InMemoryKeyValueStore;
pub use redis_store::RedisKeyValueStore;
