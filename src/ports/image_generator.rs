//! Image Generator Port - Interface for text-to-image providers.
//!
//! Used only when a model reply carries an `{{...}}` image directive.

use async_trait::async_trait;

use super::ai_provider::AIError;

/// Port for image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates one image for `prompt` and returns where it can be fetched.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, AIError>;
}

/// Reference to a generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Public URL of the image.
    pub url: String,
}

impl GeneratedImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
