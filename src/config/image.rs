//! Image generation configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Image generation configuration
///
/// Uses the key and base URL of the `ai` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Whether replies may carry `{{...}}` image directives
    #[serde(default)]
    pub enabled: bool,

    /// Image model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Requested image size, `WIDTHxHEIGHT`
    #[serde(default = "default_size")]
    pub size: String,
}

impl ImageConfig {
    /// Validate image configuration (only checked when enabled)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if self.model.is_empty() {
            return Err(ValidationError::MissingRequired("IMAGE__MODEL"));
        }
        let valid_size = self
            .size
            .split_once('x')
            .is_some_and(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok());
        if !valid_size {
            return Err(ValidationError::InvalidImageSize(self.size.clone()));
        }
        Ok(())
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            size: default_size(),
        }
    }
}

fn default_model() -> String {
    "dall-e-3".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}
