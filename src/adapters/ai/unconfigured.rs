//! Placeholder provider used when no completion credential is configured.
//!
//! Every call fails with `MissingCredential`, which the lenient gateway
//! collapses to the empty string, so all LLM-backed stages run their
//! deterministic fallbacks. This keeps the wiring total: the agent boots
//! and answers (degraded) without a key.

use async_trait::async_trait;

use crate::ports::{AiError, LanguageModel};

/// LanguageModel implementation for a missing credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredModel;

#[async_trait]
impl LanguageModel for UnconfiguredModel {
    async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::MissingCredential("GEMINI_API_KEY"))
    }
}
