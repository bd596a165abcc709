//! JSON-RPC tool gateway - HTTP implementation of the ToolGateway port.
//!
//! Tool servers speak a JSON-RPC-2.0-shaped `tools/call` envelope. The
//! nested unwrapping on the success path — `result.content[0].text`, whose
//! string value is itself JSON — is a wire-compat requirement of the
//! servers this agent talks to, not an incidental choice.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::ports::{ToolCallResult, ToolGateway};

/// HTTP JSON-RPC implementation of the ToolGateway port.
pub struct JsonRpcToolGateway {
    client: Client,
}

impl JsonRpcToolGateway {
    /// Creates a gateway with the given per-call timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    fn envelope(tool: &str, arguments: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {
                "name": tool,
                "arguments": arguments
            },
            "id": 1
        })
    }
}

impl Default for JsonRpcToolGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl ToolGateway for JsonRpcToolGateway {
    async fn invoke(&self, endpoint: &str, tool: &str, arguments: Value) -> ToolCallResult {
        let payload = Self::envelope(tool, arguments);

        let response = match self.client.post(endpoint).json(&payload).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(tool, endpoint, error = %e, "tool call transport failure");
                return ToolCallResult::Failure(format!("tool server error: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(tool, endpoint, %status, "tool call returned non-success status");
            return ToolCallResult::Failure(format!("tool server error: status {}", status));
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                return ToolCallResult::Failure(format!("tool server error: {}", e));
            }
        };

        match extract_tool_payload(&body) {
            Ok(payload) => ToolCallResult::Success(payload),
            Err(reason) => {
                tracing::warn!(tool, endpoint, reason, "malformed tool response envelope");
                ToolCallResult::Failure(reason.to_string())
            }
        }
    }
}

/// Unwraps the nested response envelope: `result.content[0].text` parsed as
/// JSON. Any deviation from that shape is an error, not a partial result.
fn extract_tool_payload(body: &Value) -> Result<Value, &'static str> {
    let text = body
        .get("result")
        .and_then(|r| r.get("content"))
        .and_then(Value::as_array)
        .and_then(|content| content.first())
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
        .ok_or("invalid tool response format")?;

    serde_json::from_str(text).map_err(|_| "invalid tool response format")
}
