//! Mock tool gateway for testing.
//!
//! Scripted responses keyed by tool name, plus a log of every invocation
//! (endpoint, tool, arguments) for verification.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{ToolCallResult, ToolGateway};

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub tool: String,
    pub arguments: Value,
}

/// Mock tool gateway with per-tool scripted results.
#[derive(Debug, Clone, Default)]
pub struct MockToolGateway {
    results: Arc<Mutex<HashMap<String, ToolCallResult>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockToolGateway {
    /// Creates a mock with no scripted results; unscripted tools fail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful payload for `tool`.
    pub fn with_success(self, tool: impl Into<String>, payload: Value) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(tool.into(), ToolCallResult::Success(payload));
        self
    }

    /// Scripts a failure for `tool`.
    pub fn with_failure(self, tool: impl Into<String>, reason: impl Into<String>) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(tool.into(), ToolCallResult::Failure(reason.into()));
        self
    }

    /// Invocations recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolGateway for MockToolGateway {
    async fn invoke(&self, endpoint: &str, tool: &str, arguments: Value) -> ToolCallResult {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.to_string(),
            tool: tool.to_string(),
            arguments,
        });

        self.results
            .lock()
            .unwrap()
            .get(tool)
            .cloned()
            .unwrap_or_else(|| {
                ToolCallResult::Failure(format!("tool server error: unscripted tool '{}'", tool))
            })
    }
}
