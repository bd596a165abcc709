//! ClassifyIntentHandler - LLM intent classification with keyword fallback.

use serde_json::{json, Value};

use crate::application::extraction::{ExtractionRequest, ExtractionResult, Extractor};
use crate::application::llm_gateway::LlmGateway;
use crate::domain::Intent;

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub details: Value,
}

/// Handler for intent classification.
///
/// The LLM path asks for `{intent, confidence, details}`; an unrecognized
/// intent string lands on product search (the dispatch default), and an
/// unusable completion falls back to the deterministic keyword scan in
/// [`Intent::from_keywords`].
pub struct ClassifyIntentHandler {
    extractor: Extractor,
}

const CLASSIFY_SCHEMA: &str = r#"Classify the user message intent. Fields:
intent ("product_search" | "order_creation" | "order_status" | "info_search"),
confidence (0.0-1.0),
details {extracted_info: relevant information extracted from the message}.
Intent Classification Rules:
- "product_search": user is looking for products, asking about availability, prices, or product information
- "order_creation": user wants to buy/purchase/order something, mentions placing an order
- "order_status": user wants to track/check order status, mentions order ID or tracking
- "info_search": user is asking for business information such as return/exchange policy, contact details (phone/email/address), current offers/discounts/promotions"#;

impl ClassifyIntentHandler {
    pub fn new(llm: LlmGateway) -> Self {
        Self {
            extractor: Extractor::new(llm),
        }
    }

    fn request(message: &str) -> ExtractionRequest {
        ExtractionRequest::new(CLASSIFY_SCHEMA, message)
            .with_example("Show me floral shirts", r#"{"intent":"product_search"}"#)
            .with_example("I want to buy this product", r#"{"intent":"order_creation"}"#)
            .with_example("What's the status of order 12345?", r#"{"intent":"order_status"}"#)
            .with_example("Track my order", r#"{"intent":"order_status"}"#)
            .with_example("What is your return policy?", r#"{"intent":"info_search"}"#)
            .with_example("How can I contact support?", r#"{"intent":"info_search"}"#)
            .with_example("Any offers or discounts right now?", r#"{"intent":"info_search"}"#)
    }

    /// Classifies `message`, never failing.
    pub async fn handle(&self, message: &str) -> Classification {
        match self.extractor.extract(&Self::request(message)).await {
            ExtractionResult::Found(fields) => {
                let intent = fields
                    .get("intent")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<Intent>().ok())
                    .unwrap_or(Intent::ProductSearch);
                let details = fields.get("details").cloned().unwrap_or_else(|| json!({}));
                Classification { intent, details }
            }
            ExtractionResult::NotFound => {
                let intent = Intent::from_keywords(message);
                tracing::debug!(%intent, "intent classified by keyword fallback");
                Classification {
                    intent,
                    details: json!({}),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockLanguageModel;
    use std::sync::Arc;

    fn handler(model: MockLanguageModel) -> ClassifyIntentHandler {
        ClassifyIntentHandler::new(LlmGateway::new(Arc::new(model)))
    }

    #[tokio::test]
    async fn classifies_from_llm_output() {
        let handler = handler(MockLanguageModel::new().with_response(
            r#"{"intent": "order_status", "confidence": 0.95, "details": {"extracted_info": "order 12345"}}"#,
        ));

        let result = handler.handle("What's the status of order 12345?").await;
        assert_eq!(result.intent, Intent::OrderStatus);
        assert_eq!(result.details["extracted_info"], "order 12345");
    }

    #[tokio::test]
    async fn unknown_intent_string_defaults_to_product_search() {
        let handler = handler(MockLanguageModel::new().with_response(r#"{"intent": "chitchat"}"#));

        let result = handler.handle("hello there").await;
        assert_eq!(result.intent, Intent::ProductSearch);
    }

    #[tokio::test]
    async fn unusable_output_uses_keyword_fallback() {
        let handler = handler(MockLanguageModel::new().with_response("no json in this completion"));

        let result = handler.handle("track my delivery please").await;
        assert_eq!(result.intent, Intent::OrderStatus);
        assert_eq!(result.details, json!({}));
    }

    #[tokio::test]
    async fn fallback_precedence_order_beats_info() {
        let handler = handler(MockLanguageModel::new());

        let result = handler.handle("buy me a refund").await;
        assert_eq!(result.intent, Intent::OrderCreation);
    }

    #[tokio::test]
    async fn fallback_defaults_to_product_search() {
        let handler = handler(MockLanguageModel::new());

        let result = handler.handle("floral shirts").await;
        assert_eq!(result.intent, Intent::ProductSearch);
    }
}
