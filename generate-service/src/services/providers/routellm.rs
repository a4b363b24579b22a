//! RouteLLM provider implementation.
//!
//! Proxies deck prompts to the RouteLLM chat-completions API and relays
//! the response payload unmodified.

use super::{ProviderError, TextProvider};
use crate::config::RouteLlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// System prompt fixed for deck generation requests.
const DECK_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates presentation content.";

/// Output token cap for deck generation requests.
const DECK_MAX_TOKENS: u32 = 2000;

/// RouteLLM text provider.
pub struct RouteLlmTextProvider {
    config: RouteLlmConfig,
    client: Client,
}

impl RouteLlmTextProvider {
    pub fn new(config: RouteLlmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Resolve the API key, or fail before any network I/O happens.
    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            ProviderError::NotConfigured(
                "No RouteLLM text API key found. Please set ROUTELLM_KEY_1 in your environment variables."
                    .to_string(),
            )
        })
    }

    /// Resolve the text model, or fail before any network I/O happens.
    fn text_model(&self) -> Result<&str, ProviderError> {
        self.config.text_model.as_deref().ok_or_else(|| {
            ProviderError::NotConfigured(
                "ROUTELLM_TEXT_MODEL environment variable is not set.".to_string(),
            )
        })
    }
}

#[async_trait]
impl TextProvider for RouteLlmTextProvider {
    async fn generate(&self, prompt: &str) -> Result<serde_json::Value, ProviderError> {
        let api_key = self.api_key()?;
        let model = self.text_model()?;

        let request = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: DECK_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: DECK_MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.config.base_url);

        tracing::debug!(
            model = %model,
            prompt_len = prompt.len(),
            "Sending request to RouteLLM API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .unwrap_or_else(|| format!("RouteLLM API returned status {}", status.as_u16()));
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse RouteLLM response: {}", e))
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.api_key()?;
        self.text_model()?;
        Ok(())
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// RouteLLM errors carry either a top-level `message` or an OpenAI-style
/// nested `error.message`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

// ============================================================================
// RouteLLM API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}
