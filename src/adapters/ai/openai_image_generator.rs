//! OpenAI image generation adapter.
//!
//! Calls `POST {base_url}/images/generations` and returns `data[0].url`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::openai_provider::{handle_response_status, OpenAIConfig};
use crate::ports::{AIError, GeneratedImage, ImageGenerator};

/// Image generator backed by the OpenAI images endpoint.
pub struct OpenAIImageGenerator {
    config: OpenAIConfig,
    size: String,
    client: Client,
}

impl OpenAIImageGenerator {
    /// Creates a generator. `config.model` names the image model (e.g. "dall-e-3").
    pub fn new(config: OpenAIConfig, size: impl Into<String>) -> Result<Self, AIError> {
        let client = config.build_client()?;
        Ok(Self {
            config,
            size: size.into(),
            client,
        })
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.config.base_url)
    }

    fn to_request<'a>(&'a self, prompt: &'a str) -> ImageRequest<'a> {
        ImageRequest {
            model: &self.config.model,
            prompt,
            n: 1,
            size: &self.size,
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAIImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, AIError> {
        tracing::debug!(model = %self.config.model, size = %self.size, "requesting image");

        let response = self
            .client
            .post(self.generations_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&self.to_request(prompt))
            .send()
            .await
            .map_err(|e| self.config.transport_error(e))?;

        let response = handle_response_status(response).await?;
        let body: ImageResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse image response: {}", e)))?;

        first_url(body).map(GeneratedImage::new)
    }
}

fn first_url(body: ImageResponse) -> Result<String, AIError> {
    body.data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .ok_or_else(|| AIError::parse("No image URL in response"))
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}
