//! Text generation provider abstraction.
//!
//! The suggestion service only needs "prompt in, text out"; the Gemini client
//! is the production implementation.

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("{0}")]
    NetworkError(String),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("No content received from AI API.")]
    EmptyResponse,
}

/// Trait for single-turn text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` as one user turn and return the first candidate's text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Model identifier, for logs and metrics.
    fn model(&self) -> &str;
}
