//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - chat-completion endpoint
//! - `ImageGenerator` - optional text-to-image endpoint
//! - `KeyValueStore` - conversation store (Redis in production)

mod ai_provider;
mod image_generator;
mod key_value_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, SamplingParams, TokenUsage,
};
pub use image_generator::{GeneratedImage, ImageGenerator};
pub use key_value_store::{KeyValueStore, StoreError};
