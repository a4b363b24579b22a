use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default RouteLLM API base URL (includes the `/v1` prefix).
const DEFAULT_ROUTELLM_BASE_URL: &str = "https://routellm.abacus.ai/v1";

/// Default Hugging Face inference endpoint for the image pipeline.
const DEFAULT_HUGGINGFACE_API_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub routellm: RouteLlmConfig,
    pub huggingface: HuggingFaceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteLlmConfig {
    pub base_url: String,
    /// Bearer token for the RouteLLM API. Optional at load so the service
    /// can boot without credentials; checked when a deck request arrives.
    pub api_key: Option<String>,
    /// Model used for deck/text generation (e.g. route-llm).
    pub text_model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl GenerateConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(GenerateConfig {
            common: common_config,
            routellm: RouteLlmConfig {
                base_url: env::var("ROUTELLM_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_ROUTELLM_BASE_URL.to_string()),
                api_key: env::var("ROUTELLM_KEY_1").ok(),
                text_model: env::var("ROUTELLM_TEXT_MODEL").ok(),
            },
            huggingface: HuggingFaceConfig {
                api_url: env::var("HUGGINGFACE_API_URL")
                    .unwrap_or_else(|_| DEFAULT_HUGGINGFACE_API_URL.to_string()),
                api_key: env::var("HF_API_KEY").ok(),
            },
        })
    }
}
