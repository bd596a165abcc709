//! Mock language model for testing.
//!
//! Provides a configurable mock implementation of the LanguageModel port,
//! allowing tests to run without calling a real completion API.
//!
//! # Features
//!
//! - Pre-configured responses consumed in order
//! - Error injection for resilience testing
//! - Prompt history for verification
//!
//! # Example
//!
//! ```ignore
//! let model = MockLanguageModel::new()
//!     .with_response(r#"{"intent": "order_status"}"#)
//!     .with_error(AiError::AuthenticationFailed);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AiError, LanguageModel};

/// Mock language model for testing.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel {
    /// Scripted responses (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<String, AiError>>>>,
    /// Prompts received, for verification.
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLanguageModel {
    /// Creates a mock with no scripted responses.
    ///
    /// An exhausted (or empty) script yields empty completions, which is
    /// also how every handler's fallback branch is most easily exercised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_consumed_in_order() {
        let model = MockLanguageModel::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(model.complete("a").await.unwrap(), "first");
        assert_eq!(model.complete("b").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn exhausted_script_yields_empty_completion() {
        let model = MockLanguageModel::new();
        assert_eq!(model.complete("anything").await.unwrap(), "");
    }

    #[tokio::test]
    async fn error_injection() {
        let model = MockLanguageModel::new().with_error(AiError::AuthenticationFailed);
        assert!(matches!(
            model.complete("x").await,
            Err(AiError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn records_prompts() {
        let model = MockLanguageModel::new().with_response("ok");
        model.complete("classify this").await.unwrap();

        assert_eq!(model.call_count(), 1);
        assert_eq!(model.prompts()[0], "classify this");
    }
}
