//! InfoSearchHandler - grounded informational answers with a static fallback.
//!
//! The retrieval chain has several hard external dependencies (completion
//! credential, index credential, index name/host) and several soft failure
//! modes (empty index, transport errors, unusable completions). Any failure
//! anywhere switches the whole turn to the canned topic answers in
//! `domain::info_fallback`, annotated with the failure reason. The fallback
//! itself cannot fail.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::application::llm_gateway::LlmGateway;
use crate::domain::info_fallback::fallback_answer;
use crate::ports::{KnowledgeError, KnowledgeIndex};

/// Keywords that select the offers-style answer template.
const OFFER_KEYWORDS: &[&str] = &[
    "offer",
    "offers",
    "discount",
    "sale",
    "flash",
    "deal",
    "coupon",
    "membership",
    "loyalty",
];

/// Handler for informational queries over the knowledge base.
pub struct InfoSearchHandler {
    llm: LlmGateway,
    /// `None` when any retrieval dependency is unconfigured.
    index: Option<Arc<dyn KnowledgeIndex>>,
    top_k: usize,
    brand: String,
}

impl InfoSearchHandler {
    pub fn new(
        llm: LlmGateway,
        index: Option<Arc<dyn KnowledgeIndex>>,
        top_k: usize,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            index,
            top_k,
            brand: brand.into(),
        }
    }

    /// Answers `message`, degrading to the static fallback on any failure.
    pub async fn handle(&self, message: &str) -> Value {
        match self.try_retrieval(message).await {
            Ok(payload) => payload,
            Err(reason) => {
                tracing::warn!(%reason, "retrieval chain unavailable, serving static fallback");
                let fb = fallback_answer(message);
                json!({
                    "info": {
                        "topic": fb.topic.as_str(),
                        "answer": fb.answer,
                        "note": format!(
                            "RAG not available; showing fallback information. Error: {}",
                            reason
                        ),
                    }
                })
            }
        }
    }

    async fn try_retrieval(&self, message: &str) -> Result<Value, String> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| KnowledgeError::MissingConfiguration("knowledge index").to_string())?;

        // Probe with a single item purely to detect an empty index before
        // spending the full retrieval + completion budget.
        let probe = index
            .search("test", 1)
            .await
            .map_err(|e| e.to_string())?;
        if probe.is_empty() {
            return Err(KnowledgeError::EmptyIndex.to_string());
        }

        let documents = index
            .search(message, self.top_k)
            .await
            .map_err(|e| e.to_string())?;

        let context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let grounded_prompt = format!(
            "Answer strictly based on the retrieved documents below. \
If nothing relevant is retrieved, say so. \
Rephrase and organize the content into a polished, conversational response.\n\n\
Retrieved documents:\n{context}\n\nUser question: {message}"
        );

        let raw_answer = self.llm.complete(&grounded_prompt).await;
        if raw_answer.trim().is_empty() {
            return Err("language model returned no grounded answer".to_string());
        }

        // Second pass: brand-style the grounded answer. An empty styling
        // pass falls back to the grounded answer itself, not to an error.
        let formatted = self.llm.complete(&self.format_prompt(message, &raw_answer)).await;
        let answer = if formatted.trim().is_empty() {
            raw_answer.trim().to_string()
        } else {
            formatted.trim().to_string()
        };

        let sources = dedup_sources(
            documents
                .iter()
                .filter_map(|d| d.source.clone())
                .collect::<Vec<_>>(),
        );

        Ok(json!({
            "info": {
                "topic": "general",
                "answer": answer,
            },
            "sources": sources,
        }))
    }

    fn format_prompt(&self, message: &str, raw_answer: &str) -> String {
        let brand = &self.brand;
        let instructions = format!(
            "Rephrase and organize the content into a polished, conversational {brand}-branded response.\n\
- Use headings, bullet points, and bold highlights.\n\
- Keep it warm, helpful, and modern.\n\
- Do not include citations, technical details, or raw snippets.\n"
        );

        if is_offer_query(message) {
            format!(
                r#"You are a {brand} copywriter. Based strictly on the following content, produce a marketing-quality answer.

{instructions}
FORMAT THE ANSWER LIKE THIS:
- Title: "Current Offers at {brand}"
- A warm one-line welcome.
- Numbered sections for each distinct offer found (name + 1-2 bullets with percentages, codes, timing, or categories when available). Do not invent details.
- Optional section: "Exclusive Member Benefits" if such info appears in the content.
- Close with a friendly invitation to ask more.

CONTENT TO USE:
{raw_answer}"#
            )
        } else {
            format!(
                r#"You are a {brand} copywriter. Based strictly on the following content, produce a structured, skimmable answer.

{instructions}
Preferred structure when applicable:
- Start with a friendly heading (e.g., ### About {brand})
- Include subheadings such as **Who We Are**, **Product Range**, **Why Choose Us**, **Member Benefits**, **Sustainability & Community**, **How to Stay Updated**.
- Close with a helpful invitation to explore or ask more.

CONTENT TO USE:
{raw_answer}"#
            )
        }
    }
}

fn is_offer_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    OFFER_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Deduplicates source identifiers preserving first-seen order.
fn dedup_sources(sources: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    sources.into_iter().filter(|s| seen.insert(s.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockKnowledgeIndex, MockLanguageModel};
    use crate::ports::RetrievedDocument;

    fn llm(model: MockLanguageModel) -> LlmGateway {
        LlmGateway::new(Arc::new(model))
    }

    fn docs() -> Vec<RetrievedDocument> {
        vec![
            RetrievedDocument::new("Returns accepted within 14 days.", Some("policy.docx".to_string()), 0.9),
            RetrievedDocument::new("Include original tags.", Some("policy.docx".to_string()), 0.8),
            RetrievedDocument::new("Members get free returns.", Some("membership.docx".to_string()), 0.7),
        ]
    }

    #[tokio::test]
    async fn grounded_answer_with_deduped_sources() {
        let model = MockLanguageModel::new()
            .with_response("Returns are accepted within 14 days with tags.")
            .with_response("### Returns at Storefront\nReturns are accepted within 14 days.");
        let index = MockKnowledgeIndex::with_documents(docs());
        let handler = InfoSearchHandler::new(llm(model), Some(Arc::new(index)), 8, "Storefront");

        let response = handler.handle("What is your return policy?").await;

        assert_eq!(response["info"]["topic"], "general");
        assert!(response["info"]["answer"].as_str().unwrap().contains("Returns"));
        assert_eq!(response["sources"], json!(["policy.docx", "membership.docx"]));
        assert!(response["info"].get("note").is_none());
    }

    #[tokio::test]
    async fn unconfigured_index_serves_fallback() {
        let model = MockLanguageModel::new();
        let handler = InfoSearchHandler::new(llm(model), None, 8, "Storefront");

        let response = handler.handle("What is your return policy?").await;

        assert_eq!(response["info"]["topic"], "return_policy");
        let note = response["info"]["note"].as_str().unwrap();
        assert!(note.contains("RAG not available"));
        assert!(note.contains("missing configuration"));
    }

    #[tokio::test]
    async fn empty_index_detected_by_probe() {
        let model = MockLanguageModel::new().with_response("should never be used");
        let index = MockKnowledgeIndex::empty();
        let handler =
            InfoSearchHandler::new(llm(model), Some(Arc::new(index.clone())), 8, "Storefront");

        let response = handler.handle("any offers?").await;

        assert_eq!(response["info"]["topic"], "current_offers");
        assert!(response["info"]["note"]
            .as_str()
            .unwrap()
            .contains("empty"));
        // Only the probe ran; the top-k retrieval was never attempted
        assert_eq!(index.queries(), vec![("test".to_string(), 1)]);
    }

    #[tokio::test]
    async fn retrieval_error_serves_fallback() {
        let model = MockLanguageModel::new();
        let index = MockKnowledgeIndex::failing(KnowledgeError::retrieval("index down"));
        let handler = InfoSearchHandler::new(llm(model), Some(Arc::new(index)), 8, "Storefront");

        let response = handler.handle("how do I contact support?").await;

        assert_eq!(response["info"]["topic"], "contact_details");
        assert!(response["info"]["note"].as_str().unwrap().contains("index down"));
    }

    #[tokio::test]
    async fn empty_grounded_answer_serves_fallback() {
        // Both completions degrade to empty (e.g. credential failure)
        let model = MockLanguageModel::new();
        let index = MockKnowledgeIndex::with_documents(docs());
        let handler = InfoSearchHandler::new(llm(model), Some(Arc::new(index)), 8, "Storefront");

        let response = handler.handle("tell me about the store").await;

        assert_eq!(response["info"]["topic"], "general");
        assert!(response["info"]["note"].as_str().unwrap().contains("RAG not available"));
    }

    #[tokio::test]
    async fn empty_styling_pass_keeps_grounded_answer() {
        let model = MockLanguageModel::new()
            .with_response("Grounded answer text.")
            .with_response("");
        let index = MockKnowledgeIndex::with_documents(docs());
        let handler = InfoSearchHandler::new(llm(model), Some(Arc::new(index)), 8, "Storefront");

        let response = handler.handle("what are the store policies?").await;

        assert_eq!(response["info"]["answer"], "Grounded answer text.");
    }

    #[tokio::test]
    async fn offer_queries_use_offers_template() {
        let model = MockLanguageModel::new()
            .with_response("10% off sitewide this week.")
            .with_response("Current Offers\n1. 10% off sitewide");
        let index = MockKnowledgeIndex::with_documents(docs());
        let handler = InfoSearchHandler::new(
            llm(model.clone()),
            Some(Arc::new(index)),
            8,
            "Storefront",
        );

        handler.handle("any membership discount?").await;

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("Current Offers at Storefront"));
        assert!(prompts[1].contains("Do not invent details"));
    }

    #[tokio::test]
    async fn general_queries_use_general_template() {
        let model = MockLanguageModel::new()
            .with_response("We are a store.")
            .with_response("### About Storefront");
        let index = MockKnowledgeIndex::with_documents(docs());
        let handler = InfoSearchHandler::new(
            llm(model.clone()),
            Some(Arc::new(index)),
            8,
            "Storefront",
        );

        handler.handle("tell me about the store").await;

        let prompts = model.prompts();
        assert!(prompts[1].contains("**Who We Are**"));
        assert!(!prompts[1].contains("Current Offers at"));
    }

    #[test]
    fn dedup_preserves_first_seen_order() {
        let deduped = dedup_sources(vec![
            "b.docx".to_string(),
            "a.docx".to_string(),
            "b.docx".to_string(),
            "c.docx".to_string(),
            "a.docx".to_string(),
        ]);
        assert_eq!(deduped, vec!["b.docx", "a.docx", "c.docx"]);
    }

    #[test]
    fn offer_query_detection() {
        assert!(is_offer_query("any FLASH sale?"));
        assert!(is_offer_query("loyalty program?"));
        assert!(!is_offer_query("what is your return window?"));
    }
}
