//! OrderStatusHandler - extract an order id, look it up, format.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::application::extraction::{ExtractionRequest, ExtractionResult, Extractor};
use crate::application::llm_gateway::LlmGateway;
use crate::domain::json_scrape::scrape_json_or;
use crate::ports::{ToolCallResult, ToolGateway};

const MISSING_ID_ERROR: &str = "Please provide a valid order ID to check status.";

const EXTRACT_SCHEMA: &str = "Extract the order ID from the message. Fields: \
order_id (extracted order ID), found (true/false). \
Look for numbers that could be order IDs.";

/// Handler for order status requests.
pub struct OrderStatusHandler {
    llm: LlmGateway,
    extractor: Extractor,
    tools: Arc<dyn ToolGateway>,
    endpoint: String,
}

impl OrderStatusHandler {
    pub fn new(llm: LlmGateway, tools: Arc<dyn ToolGateway>, endpoint: impl Into<String>) -> Self {
        Self {
            extractor: Extractor::new(llm.clone()),
            llm,
            tools,
            endpoint: endpoint.into(),
        }
    }

    /// Runs the status lookup workflow.
    pub async fn handle(&self, message: &str) -> Value {
        let request = ExtractionRequest::new(EXTRACT_SCHEMA, message).with_example(
            "What's the status of order 5904242344019?",
            r#"{"order_id":"5904242344019","found":true}"#,
        );

        let fields = match self.extractor.extract(&request).await {
            ExtractionResult::Found(fields) => fields,
            ExtractionResult::NotFound => return json!({"error": MISSING_ID_ERROR}),
        };

        if !fields.get("found").and_then(Value::as_bool).unwrap_or(false) {
            return json!({"error": MISSING_ID_ERROR});
        }

        // The order tool keys strictly on integer ids
        let order_id = match fields.get("order_id").and_then(as_integer) {
            Some(id) => id,
            None => return json!({"error": "Invalid order ID format."}),
        };

        let raw_result = match self
            .tools
            .invoke(&self.endpoint, "get_order_status", json!({"order_id": order_id}))
            .await
        {
            ToolCallResult::Success(payload) => payload,
            ToolCallResult::Failure(reason) => json!({"error": reason}),
        };

        self.format_result(&raw_result).await
    }

    /// Formats the raw status payload, or returns it unmodified if the
    /// formatting pass fails.
    async fn format_result(&self, raw_result: &Value) -> Value {
        let completion = self.llm.complete(&format_prompt(raw_result)).await;
        scrape_json_or(&completion, || {
            tracing::debug!("status formatting unparseable, passing raw result through");
            raw_result.clone()
        })
    }
}

fn format_prompt(raw_result: &Value) -> String {
    let raw_json =
        serde_json::to_string_pretty(raw_result).unwrap_or_else(|_| raw_result.to_string());
    format!(
        r##"Format the order status result into the exact JSON structure below:

Required JSON format:
{{
  "order_id": order_id_number,
  "order_number": "#ORDER_NUMBER",
  "product": "PRODUCT_NAME",
  "quantity": quantity_number,
  "total_paid": "AMOUNT INR",
  "status": "STATUS",
  "fulfillment_status": "FULFILLMENT_STATUS",
  "order_date": "YYYY-MM-DD HH:MM:SS"
}}

Raw order status result: {raw_json}

Extract the order ID, order number, product name, quantity, total amount, status, fulfillment status, and order date from the raw data.
For fulfillment_status, use "Not yet shipped" if null or empty, otherwise use the actual status.
Return ONLY the formatted JSON, no other text."##
    )
}

/// Accepts integers given as JSON numbers or numeric strings.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockLanguageModel, MockToolGateway};

    const ENDPOINT: &str = "https://orders.example.com/api/mcp";

    fn handler(model: MockLanguageModel, tools: MockToolGateway) -> OrderStatusHandler {
        OrderStatusHandler::new(LlmGateway::new(Arc::new(model)), Arc::new(tools), ENDPOINT)
    }

    #[tokio::test]
    async fn invokes_tool_with_integer_order_id() {
        let model = MockLanguageModel::new()
            .with_response(r#"{"order_id": "5904242344019", "found": true}"#)
            .with_response("unparseable");
        let tools = MockToolGateway::new()
            .with_success("get_order_status", json!({"order": {"id": 5904242344019i64}}));

        handler(model, tools.clone()).handle("What's the status of order 5904242344019?").await;

        let calls = tools.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool, "get_order_status");
        assert_eq!(calls[0].arguments, json!({"order_id": 5904242344019i64}));
    }

    #[tokio::test]
    async fn not_found_extraction_is_terminal() {
        let model = MockLanguageModel::new().with_response(r#"{"found": false}"#);
        let tools = MockToolGateway::new();

        let response = handler(model, tools.clone()).handle("track my order").await;

        assert_eq!(response["error"], MISSING_ID_ERROR);
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn unusable_extraction_is_terminal() {
        let model = MockLanguageModel::new().with_response("no json");
        let tools = MockToolGateway::new();

        let response = handler(model, tools.clone()).handle("track").await;

        assert_eq!(response["error"], MISSING_ID_ERROR);
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_order_id_is_rejected() {
        let model = MockLanguageModel::new()
            .with_response(r#"{"order_id": "ORD-XYZ", "found": true}"#);
        let tools = MockToolGateway::new();

        let response = handler(model, tools.clone()).handle("status of ORD-XYZ").await;

        assert_eq!(response["error"], "Invalid order ID format.");
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn formatted_status_is_returned() {
        let formatted = json!({
            "order_id": 5904242344019i64,
            "order_number": "#1042",
            "product": "Floral Shirt",
            "quantity": 1,
            "total_paid": "1500 INR",
            "status": "paid",
            "fulfillment_status": "Not yet shipped",
            "order_date": "2024-05-01 10:30:00"
        });
        let model = MockLanguageModel::new()
            .with_response(r#"{"order_id": "5904242344019", "found": true}"#)
            .with_response(formatted.to_string());
        let tools = MockToolGateway::new()
            .with_success("get_order_status", json!({"order": {"fulfillment_status": null}}));

        let response = handler(model, tools).handle("status of 5904242344019").await;

        assert_eq!(response["fulfillment_status"], "Not yet shipped");
        assert_eq!(response["order_id"], 5904242344019i64);
    }

    #[tokio::test]
    async fn unparseable_formatting_passes_raw_result_through() {
        let raw = json!({"order": {"id": 42, "financial_status": "paid"}});
        let model = MockLanguageModel::new()
            .with_response(r#"{"order_id": "42", "found": true}"#)
            .with_response("the order is paid");
        let tools = MockToolGateway::new().with_success("get_order_status", raw.clone());

        let response = handler(model, tools).handle("status of 42").await;

        assert_eq!(response, raw);
    }

    #[tokio::test]
    async fn tool_failure_becomes_error_payload() {
        let model = MockLanguageModel::new()
            .with_response(r#"{"order_id": "42", "found": true}"#)
            .with_response("unparseable");
        let tools = MockToolGateway::new().with_failure("get_order_status", "tool server error: status 502");

        let response = handler(model, tools).handle("status of 42").await;

        assert_eq!(response["error"], "tool server error: status 502");
    }

    #[test]
    fn format_prompt_carries_not_yet_shipped_rule() {
        let prompt = format_prompt(&json!({"order": {"fulfillment_status": null}}));
        assert!(prompt.contains("use \"Not yet shipped\" if null or empty"));
        assert!(prompt.contains("\"fulfillment_status\": null"));
    }
}
