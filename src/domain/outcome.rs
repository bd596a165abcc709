//! Workflow run results.
//!
//! One run produces exactly one outcome, keyed by the intent that was
//! dispatched. Making the outcome a sum type (instead of four optional
//! fields on a shared record) turns the "exactly one result populated"
//! invariant into a compile-time guarantee; [`AgentEnvelope::full_state`]
//! serializes back into the legacy mapping shape for wire compatibility.

use serde_json::{json, Value};

use super::intent::Intent;

/// The single result of a workflow run, keyed by handled intent.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutcome {
    /// Product search result payload.
    Products(Value),
    /// Order creation result payload.
    OrderResult(Value),
    /// Order status result payload.
    OrderStatus(Value),
    /// Informational/RAG result payload.
    InfoResult(Value),
    /// Terminal error payload from an orchestrator-level failure.
    Error(Value),
}

impl AgentOutcome {
    /// Builds the outcome variant matching `intent`.
    pub fn for_intent(intent: Intent, payload: Value) -> Self {
        match intent {
            Intent::ProductSearch => AgentOutcome::Products(payload),
            Intent::OrderCreation => AgentOutcome::OrderResult(payload),
            Intent::OrderStatus => AgentOutcome::OrderStatus(payload),
            Intent::InfoSearch => AgentOutcome::InfoResult(payload),
        }
    }

    /// Intent label reported in the envelope ("error" for failures).
    pub fn intent_label(&self) -> &'static str {
        match self {
            AgentOutcome::Products(_) => Intent::ProductSearch.as_str(),
            AgentOutcome::OrderResult(_) => Intent::OrderCreation.as_str(),
            AgentOutcome::OrderStatus(_) => Intent::OrderStatus.as_str(),
            AgentOutcome::InfoResult(_) => Intent::InfoSearch.as_str(),
            AgentOutcome::Error(_) => "error",
        }
    }

    /// Key under which the payload appears in the legacy state mapping.
    pub fn result_key(&self) -> &'static str {
        match self {
            AgentOutcome::Products(_) => "products",
            AgentOutcome::OrderResult(_) => "order_result",
            AgentOutcome::OrderStatus(_) => "order_status",
            AgentOutcome::InfoResult(_) => "info_result",
            AgentOutcome::Error(_) => "error",
        }
    }

    /// The result payload.
    pub fn payload(&self) -> &Value {
        match self {
            AgentOutcome::Products(v)
            | AgentOutcome::OrderResult(v)
            | AgentOutcome::OrderStatus(v)
            | AgentOutcome::InfoResult(v)
            | AgentOutcome::Error(v) => v,
        }
    }
}

/// The response envelope assembled once per workflow run.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentEnvelope {
    /// The message that drove this run.
    pub user_message: String,
    /// Classifier-extracted details.
    pub intent_details: Value,
    /// The single handler result.
    pub outcome: AgentOutcome,
    /// JSON-encoded payload handed to the chat surface.
    pub final_response: String,
}

impl AgentEnvelope {
    /// Assembles the envelope, rendering `final_response` from the outcome
    /// payload with a `user_intent` key injected when the payload is an
    /// object that does not already define one.
    pub fn new(user_message: impl Into<String>, intent_details: Value, outcome: AgentOutcome) -> Self {
        let mut payload = outcome.payload().clone();
        if let Value::Object(ref mut map) = payload {
            map.entry("user_intent")
                .or_insert_with(|| Value::String(outcome.intent_label().to_string()));
        }
        let final_response =
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());

        Self {
            user_message: user_message.into(),
            intent_details,
            outcome,
            final_response,
        }
    }

    /// The intent label for this run.
    pub fn intent(&self) -> &'static str {
        self.outcome.intent_label()
    }

    /// Serializes the run into the legacy flat state mapping.
    pub fn full_state(&self) -> Value {
        let mut state = json!({
            "user_message": self.user_message,
            "intent": self.intent(),
            "intent_details": self.intent_details,
            "final_response": self.final_response,
        });
        state[self.outcome.result_key()] = self.outcome.payload().clone();
        state
    }
}
