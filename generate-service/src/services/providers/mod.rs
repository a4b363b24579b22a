//! Upstream generation provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction over the third-party
//! generation APIs, so the dispatcher is independent of any one vendor.

pub mod huggingface;
pub mod routellm;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A required credential or setting is absent. A deployment defect,
    /// not a client or upstream failure.
    #[error("{0}")]
    NotConfigured(String),

    /// The upstream API answered with a non-success status. The status is
    /// forwarded to the caller together with the extracted message.
    #[error("upstream status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The upstream call never produced a response.
    #[error("{0}")]
    Network(String),

    /// The upstream answered with a success status but an unusable body.
    #[error("{0}")]
    InvalidResponse(String),

    /// The pipeline exists in the API surface but is not wired up yet.
    #[error("{0}")]
    NotImplemented(String),
}

/// Trait for deck/text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate deck content for a prompt, returning the upstream response
    /// payload verbatim.
    async fn generate(&self, prompt: &str) -> Result<serde_json::Value, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Trait for image generation providers.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate an image for a prompt.
    async fn generate(
        &self,
        prompt: &str,
        negative_prompt: Option<&str>,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
