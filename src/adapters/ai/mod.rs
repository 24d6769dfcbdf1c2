//! AI Provider Adapters.
//!
//! Implementations of the AIProvider and ImageGenerator ports.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat completions (GPT-4, GPT-3.5)
//! - `OpenAIImageGenerator` - OpenAI image generation (DALL-E)
//! - `MockAIProvider` - Configurable mock for testing
//! - `MockImageGenerator` - Fixed-URL mock for testing

mod mock_image_generator;
mod mock_provider;
mod openai_image_generator;
mod openai_provider;

pub use mock_image_generator::MockImageGenerator;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_image_generator::OpenAIImageGenerator;
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL};
