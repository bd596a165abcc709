//! Structured extraction - free text to a constrained JSON shape.
//!
//! Every handler starts by turning the user's message into structured
//! arguments. The prompt embeds a schema description, few-shot examples,
//! and the verbatim message; the completion is then scraped for a JSON
//! object. An unusable completion yields [`ExtractionResult::NotFound`],
//! which downstream handlers treat as terminal for the turn, never as a
//! retryable condition.

use serde_json::{Map, Value};

use crate::domain::json_scrape::scrape_object;

use super::llm_gateway::LlmGateway;

/// What to extract: schema description plus few-shot example pairs.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Natural-language schema description (field names and types).
    pub schema: String,
    /// `(input, output-JSON)` example pairs.
    pub examples: Vec<(String, String)>,
    /// The verbatim user message.
    pub text: String,
}

impl ExtractionRequest {
    /// Creates a request with no examples.
    pub fn new(schema: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            examples: Vec::new(),
            text: text.into(),
        }
    }

    /// Adds a few-shot example pair.
    pub fn with_example(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.examples.push((input.into(), output.into()));
        self
    }

    /// Renders the extraction prompt.
    pub fn prompt(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(
            "Extract structured information from the following message and return STRICT JSON only.\n",
        );
        prompt.push_str(&self.schema);
        prompt.push('\n');
        prompt.push_str(&format!("Message: \"{}\"\n", self.text));
        if !self.examples.is_empty() {
            prompt.push_str("Examples:\n");
            for (input, output) in &self.examples {
                prompt.push_str(&format!("- '{}' -> {}\n", input, output));
            }
        }
        prompt.push_str("Return ONLY the JSON object, no other text.");
        prompt
    }
}

/// Discriminated extraction outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// A JSON object was recovered from the completion.
    Found(Map<String, Value>),
    /// The completion was unusable; terminal for this turn.
    NotFound,
}

impl ExtractionResult {
    /// The extracted fields, if any.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            ExtractionResult::Found(map) => Some(map),
            ExtractionResult::NotFound => None,
        }
    }
}

/// Runs extraction requests through the lenient gateway.
#[derive(Clone)]
pub struct Extractor {
    llm: LlmGateway,
}

impl Extractor {
    /// Creates an extractor over `llm`.
    pub fn new(llm: LlmGateway) -> Self {
        Self { llm }
    }

    /// Extracts `request` from its message.
    ///
    /// Never fails: a transport error, empty completion, or unparseable
    /// output all map to [`ExtractionResult::NotFound`].
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        let completion = self.llm.complete(&request.prompt()).await;
        match scrape_object(&completion) {
            Some(map) => ExtractionResult::Found(map),
            None => {
                tracing::debug!("extraction produced no usable JSON, falling back");
                ExtractionResult::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockLanguageModel;
    use std::sync::Arc;

    fn extractor(model: MockLanguageModel) -> Extractor {
        Extractor::new(LlmGateway::new(Arc::new(model)))
    }

    #[test]
    fn prompt_embeds_schema_examples_and_text() {
        let request = ExtractionRequest::new("Fields: order_id (string), found (bool).", "where is order 42")
            .with_example("track order 7", r#"{"order_id":"7","found":true}"#);

        let prompt = request.prompt();
        assert!(prompt.contains("Fields: order_id"));
        assert!(prompt.contains("Message: \"where is order 42\""));
        assert!(prompt.contains("- 'track order 7' -> {\"order_id\":\"7\",\"found\":true}"));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }

    #[tokio::test]
    async fn extracts_object_from_clean_json() {
        let extractor = extractor(MockLanguageModel::new().with_response(r#"{"order_id": "42", "found": true}"#));

        let result = extractor
            .extract(&ExtractionRequest::new("schema", "message"))
            .await;

        let fields = result.fields().unwrap();
        assert_eq!(fields.get("order_id").unwrap(), "42");
    }

    #[tokio::test]
    async fn extracts_object_from_fenced_json() {
        let extractor = extractor(
            MockLanguageModel::new().with_response("```json\n{\"quantity\": 2}\n```"),
        );

        let result = extractor
            .extract(&ExtractionRequest::new("schema", "message"))
            .await;
        assert!(matches!(result, ExtractionResult::Found(_)));
    }

    #[tokio::test]
    async fn unusable_output_is_not_found_never_a_panic() {
        for bad in ["not json at all", "", "[1,2,3]"] {
            let extractor = extractor(MockLanguageModel::new().with_response(bad));
            let result = extractor
                .extract(&ExtractionRequest::new("schema", "message"))
                .await;
            assert_eq!(result, ExtractionResult::NotFound);
        }
    }

    #[tokio::test]
    async fn provider_error_is_not_found() {
        let extractor = extractor(
            MockLanguageModel::new().with_error(crate::ports::AiError::AuthenticationFailed),
        );
        let result = extractor
            .extract(&ExtractionRequest::new("schema", "message"))
            .await;
        assert_eq!(result, ExtractionResult::NotFound);
    }
}
