//! Lenient completion gateway.
//!
//! The workflow never observes a language model failure: any provider error
//! or empty candidate set collapses to the empty string, and callers treat
//! the empty string as "no usable output" and run their deterministic
//! fallback. No retry happens here — prompts are not safe to repeat
//! silently, and fallback-on-failure is the pipeline-wide policy.

use std::sync::Arc;

use crate::ports::LanguageModel;

/// Wrapper over the LanguageModel port with total-function semantics.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn LanguageModel>,
}

impl LlmGateway {
    /// Creates a gateway over `provider`.
    pub fn new(provider: Arc<dyn LanguageModel>) -> Self {
        Self { provider }
    }

    /// Completes `prompt`, returning the empty string on any failure.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.provider.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "language model call failed, degrading to empty completion");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockLanguageModel;
    use crate::ports::AiError;

    #[tokio::test]
    async fn passes_through_successful_completions() {
        let gateway = LlmGateway::new(Arc::new(MockLanguageModel::new().with_response("hello")));
        assert_eq!(gateway.complete("prompt").await, "hello");
    }

    #[tokio::test]
    async fn provider_errors_become_empty_string() {
        let gateway = LlmGateway::new(Arc::new(
            MockLanguageModel::new().with_error(AiError::Timeout { timeout_secs: 30 }),
        ));
        assert_eq!(gateway.complete("prompt").await, "");
    }

    #[tokio::test]
    async fn empty_completions_stay_empty() {
        let gateway = LlmGateway::new(Arc::new(MockLanguageModel::new().with_response("")));
        assert_eq!(gateway.complete("prompt").await, "");
    }
}
