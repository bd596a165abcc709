//! Language Model Port - Interface for text-completion providers.
//!
//! The contract is deliberately narrow: plain prompt in, plain text out.
//! Prompt construction, JSON scraping, and fallback policy all live above
//! this port; providers only translate between HTTP APIs and `AiError`.
//!
//! # Design
//!
//! - No internal retry: fallback-on-failure, not retry, is the resilience
//!   strategy throughout the pipeline, and prompts are not safe to repeat
//!   silently (cost/latency).
//! - Errors are values here; the application-layer gateway collapses them
//!   to the empty string so the workflow never observes a failure.

use async_trait::async_trait;
use thiserror::Error;

/// Port for text-completion providers.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// An `Ok` result may still be the empty string when the provider
    /// returned no usable candidate text.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Language model provider errors.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    /// No API key configured.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned a server-side failure.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AiError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
