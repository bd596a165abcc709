//! Tool Gateway Port - Interface for external tool-server invocation.
//!
//! Tool servers expose side-effecting operations (catalog search, order
//! creation, order status) behind a JSON-RPC-style call contract. The
//! gateway never raises past its boundary: every invocation produces a
//! [`ToolCallResult`] value, and handlers branch on it.

use async_trait::async_trait;
use serde_json::Value;

/// Port for invoking external tools.
#[async_trait]
pub trait ToolGateway: Send + Sync {
    /// Invoke `tool` at `endpoint` with JSON `arguments`.
    ///
    /// Transport failures, non-2xx statuses, and malformed response
    /// envelopes all surface as [`ToolCallResult::Failure`], never as a
    /// panic or error type.
    async fn invoke(&self, endpoint: &str, tool: &str, arguments: Value) -> ToolCallResult;
}

/// The outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallResult {
    /// The tool returned a JSON payload.
    Success(Value),
    /// The call failed; `String` carries the reason.
    Failure(String),
}

impl ToolCallResult {
    /// True when the call produced a payload.
    pub fn is_success(&self) -> bool {
        matches!(self, ToolCallResult::Success(_))
    }

    /// The payload, if the call succeeded.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ToolCallResult::Success(v) => Some(v),
            ToolCallResult::Failure(_) => None,
        }
    }

    /// The failure reason, if the call failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ToolCallResult::Success(_) => None,
            ToolCallResult::Failure(e) => Some(e),
        }
    }
}
