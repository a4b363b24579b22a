//! Hugging Face Stable Diffusion provider.
//!
//! The image pipeline is not wired up yet: the provider holds the endpoint
//! and credentials and rejects generation requests until it is.

use super::{ImageProvider, ProviderError};
use crate::config::HuggingFaceConfig;
use async_trait::async_trait;
use reqwest::Client;

/// Stable Diffusion image provider backed by the Hugging Face inference
/// API. Placeholder until the image pipeline lands.
#[allow(dead_code)]
pub struct StableDiffusionProvider {
    config: HuggingFaceConfig,
    client: Client,
}

impl StableDiffusionProvider {
    pub fn new(config: HuggingFaceConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl ImageProvider for StableDiffusionProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _negative_prompt: Option<&str>,
    ) -> Result<serde_json::Value, ProviderError> {
        Err(ProviderError::NotImplemented(
            "Image generation not yet implemented.".to_string(),
        ))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_none() {
            Err(ProviderError::NotConfigured(
                "No Hugging Face API key found. Please set HF_API_KEY in your environment variables."
                    .to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
