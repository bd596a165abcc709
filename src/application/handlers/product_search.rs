//! ProductSearchHandler - parse filters, call the catalog tool, refine.
//!
//! Three stages: LLM extraction of structured shopping intent, the catalog
//! tool call, then a second LLM pass that filters the raw product list
//! against the original message. Each stage degrades independently:
//! extraction falls back to the bare message, a failed refinement falls
//! back to the unfiltered raw list, and tool failures short-circuit into
//! diagnostic envelopes.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::application::extraction::{ExtractionRequest, ExtractionResult, Extractor};
use crate::application::llm_gateway::LlmGateway;
use crate::domain::json_scrape::scrape_json;
use crate::domain::Filter;
use crate::ports::{ToolCallResult, ToolGateway};

/// Context sent to the catalog tool to guide server-side filtering.
const SEARCH_CONTEXT_TEMPLATE: &str = "Search Query: {message}\n\
Filtering Guidelines:\n\
- Prioritize products that match the search terms in title, description, or tags\n\
- For patterns (floral, striped, etc.): prefer products with matching patterns\n\
- For product types: include relevant category matches\n\
- For price constraints: filter by specified price ranges\n\
- Return relevant products even if not exact matches\n\
- Include similar or related products when appropriate";

const PARSE_SCHEMA: &str = "Extract structured shopping intent. \
IMPORTANT: For pattern searches (floral, striped, etc.), include the pattern in BOTH 'query' and 'filters.design' fields.\n\
Fields: query (full search text including patterns), filters.price {min,max}, filters.availability (true|false|null), \
filters.sizes (array of strings), filters.colors (array of strings), filters.design (array of pattern keywords).";

/// Handler for product search requests.
pub struct ProductSearchHandler {
    llm: LlmGateway,
    extractor: Extractor,
    tools: Arc<dyn ToolGateway>,
    endpoint: String,
}

impl ProductSearchHandler {
    pub fn new(llm: LlmGateway, tools: Arc<dyn ToolGateway>, endpoint: impl Into<String>) -> Self {
        Self {
            extractor: Extractor::new(llm.clone()),
            llm,
            tools,
            endpoint: endpoint.into(),
        }
    }

    /// Runs the search workflow; the result is always a `{products, ...}`
    /// or `{error, ...}` payload, never a failure.
    pub async fn handle(&self, message: &str) -> Value {
        // Stage 1: structured shopping intent, falling back to the message
        let parsed = self.parse_query(message).await;
        let query = parsed
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or(message)
            .to_string();

        // Stage 2: tool arguments. Only price and availability are
        // forwarded as top-level arguments; sizes/colors/design stay
        // advisory inside `context` (the tool does not accept them).
        let mut arguments = Map::new();
        arguments.insert("query".to_string(), Value::String(query));
        arguments.insert(
            "context".to_string(),
            Value::String(SEARCH_CONTEXT_TEMPLATE.replace("{message}", message)),
        );

        let filters = parsed.get("filters").and_then(Value::as_object);
        if let Some(filters) = filters {
            if let Some(price @ Value::Object(_)) = filters.get("price") {
                arguments.insert("price".to_string(), price.clone());
            }
            if let Some(availability) = filters.get("availability") {
                arguments.insert("availability".to_string(), availability.clone());
            }
        }

        tracing::debug!(?arguments, "catalog search arguments");

        let result = self
            .tools
            .invoke(&self.endpoint, "search_shop_catalog", Value::Object(arguments))
            .await;

        let raw_payload = match result {
            ToolCallResult::Success(payload) => payload,
            ToolCallResult::Failure(reason) => {
                return json!({"error": format!("Product search failed: {}", reason)});
            }
        };

        if let Some(error) = raw_payload.get("error").and_then(Value::as_str) {
            return json!({"error": format!("Product search failed: {}", error)});
        }

        let raw_products = raw_payload
            .get("products")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        if raw_products.is_empty() {
            return json!({
                "products": [],
                "debug": {
                    "message": "No products returned from tool server",
                    "tool_response": raw_payload,
                }
            });
        }

        // Stage 3: LLM refinement against the original message; a failed
        // parse falls back to the unfiltered raw list.
        let refined = self.refine_products(message, &raw_products).await;
        let mut response = refined.unwrap_or_else(|| json!({"products": raw_products}));

        attach_available_filters(&mut response, &raw_payload);
        response
    }

    async fn parse_query(&self, message: &str) -> Value {
        let request = ExtractionRequest::new(PARSE_SCHEMA, message)
            .with_example("floral shirts", r#"{"query":"floral shirts","filters":{"design":["floral"]}}"#)
            .with_example(
                "striped dresses under 2000",
                r#"{"query":"striped dresses","filters":{"price":{"max":2000},"design":["striped"]}}"#,
            );

        match self.extractor.extract(&request).await {
            ExtractionResult::Found(map) => Value::Object(map),
            ExtractionResult::NotFound => json!({"query": message, "filters": {}}),
        }
    }

    async fn refine_products(&self, message: &str, raw_products: &[Value]) -> Option<Value> {
        let prompt = refinement_prompt(message, raw_products);
        let completion = self.llm.complete(&prompt).await;
        match scrape_json(&completion) {
            Some(value) => Some(value),
            None => {
                tracing::debug!("product refinement unparseable, returning raw list");
                None
            }
        }
    }
}

/// Carries the tool's `available_filters` facets into the response so the
/// caller can offer follow-up refinements. Only well-formed facets survive.
fn attach_available_filters(response: &mut Value, raw_payload: &Value) {
    let filters = Filter::from_tool_payload(raw_payload);
    if filters.is_empty() {
        return;
    }
    if let Value::Object(map) = response {
        if !map.contains_key("available_filters") {
            if let Ok(value) = serde_json::to_value(&filters) {
                map.insert("available_filters".to_string(), value);
            }
        }
    }
}

fn refinement_prompt(message: &str, raw_products: &[Value]) -> String {
    let raw_json = serde_json::to_string_pretty(raw_products).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"You are an intelligent product search assistant. Analyze the user query and filter the products based on ALL criteria mentioned.

User Query: "{message}"

INTELLIGENT FILTERING RULES:
1. PRICE FILTERING:
   - "under X", "below X", "less than X": include products where ALL variants are priced at X or less
   - "over X", "above X", "more than X": include products where ALL variants are priced at X or more
   - "between X and Y": include products where ALL variants satisfy X <= price <= Y
   - "around X", "approximately X": include products within plus or minus 20% of X

2. PATTERN/DESIGN FILTERING:
   - "floral", "striped", "polka dot", etc.: match in title, description, or product type
   - Be flexible with variations (e.g., "flower" matches "floral")

3. PRODUCT TYPE FILTERING:
   - "shirts", "dresses", "earrings", etc.: match product_type or title
   - Include related types (e.g., "tops" includes shirts, blouses, t-shirts)

4. COLOR FILTERING:
   - Match colors in title or variant titles
   - Include color variations (e.g., "blue" matches "navy", "royal blue")

5. SIZE FILTERING:
   - Match sizes in variant titles
   - Consider size ranges (S, M, L, XL, etc.)

6. AVAILABILITY FILTERING:
   - Only include products that appear to be available/in-stock

CRITICAL INSTRUCTIONS:
- Apply ALL filters mentioned in the user query
- Be strict but intelligent (use semantic understanding)
- If no products match ALL criteria, return empty products array
- Preserve original product structure exactly

Required JSON format:
{{
  "products": [
    {{
      "id": product_id,
      "title": "Product Title",
      "product_type": "Product Type",
      "variants": [
        {{"id": variant_id, "title": "Variant Title", "price": "Price"}}
      ],
      "images": [
        {{"id": image_id, "src": "image_url"}}
      ]
    }}
  ]
}}

Raw product data to filter: {raw_json}

Return ONLY the filtered JSON with products that match ALL criteria, no other text."#
    )
}
