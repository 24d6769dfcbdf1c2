//! Mock image generator for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::mock_provider::MockError;
use crate::ports::{AIError, GeneratedImage, ImageGenerator};

/// Returns a fixed URL (or a configured error) and records every prompt.
#[derive(Debug, Clone)]
pub struct MockImageGenerator {
    url: String,
    error: Option<MockError>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new("https://images.example.com/mock.png")
    }
}

impl MockImageGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with `error`.
    pub fn failing(error: MockError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, AIError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.error {
            Some(err) => Err(err.clone().into()),
            None => Ok(GeneratedImage::new(&self.url)),
        }
    }
}
