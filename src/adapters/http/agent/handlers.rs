//! HTTP handlers for the agent endpoints.
//!
//! These handlers connect Axum routes to the workflow orchestrator.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::application::handlers::ProcessMessageHandler;
use crate::domain::{latest_user_turn, ConversationTurn};

use super::dto::{AgentResponse, ErrorResponse, MessageRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for agent handlers.
#[derive(Clone)]
pub struct AgentAppState {
    pub orchestrator: Arc<ProcessMessageHandler>,
}

impl AgentAppState {
    /// Creates a new AgentAppState.
    pub fn new(orchestrator: Arc<ProcessMessageHandler>) -> Self {
        Self { orchestrator }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /agent-assistant/
// ════════════════════════════════════════════════════════════════════════════════

/// POST /agent-assistant/ - Process the latest user turn through the workflow.
///
/// # Errors
/// - 400 Bad Request: empty message list, or no turn with `source == "user"`
pub async fn agent_assistant(
    State(state): State<AgentAppState>,
    Json(request): Json<MessageRequest>,
) -> Result<impl IntoResponse, AgentApiError> {
    if request.messages.is_empty() {
        return Err(AgentApiError::BadRequest("No messages provided".to_string()));
    }

    // Turns with an unrecognized source are carried but never drive processing
    let turns: Vec<ConversationTurn> = request
        .messages
        .iter()
        .filter_map(|m| match m.source.as_str() {
            "user" => Some(ConversationTurn::user(m.content.clone())),
            "assistant" => Some(ConversationTurn::assistant(m.content.clone())),
            _ => None,
        })
        .collect();

    let user_message = latest_user_turn(&turns)
        .map(str::to_string)
        .ok_or_else(|| AgentApiError::BadRequest("No user message found".to_string()))?;

    // The orchestrator is a total function; no error branch exists here
    let envelope = state.orchestrator.handle(&user_message).await;

    let response = AgentResponse {
        chat_message: envelope.final_response.clone(),
        intent: Some(envelope.intent().to_string()),
        intent_details: Some(envelope.intent_details.clone()),
        inner_messages: Some(vec![envelope.full_state()]),
        user_intent: Some(envelope.intent().to_string()),
    };

    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /health
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "service": "storefront-agent"})),
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts boundary failures to HTTP responses.
#[derive(Debug)]
pub enum AgentApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AgentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match self {
            AgentApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AgentApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse::new(detail))).into_response()
    }
}
