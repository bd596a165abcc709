//! Axum routes for the agent endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{agent_assistant, health_check, AgentAppState};

/// Creates routes for the agent endpoints.
///
/// REST Endpoints:
/// - POST /agent-assistant/ - Process a conversation through the workflow
/// - GET /health - Liveness probe
pub fn agent_routes() -> Router<AgentAppState> {
    Router::new()
        .route("/agent-assistant/", post(agent_assistant))
        .route("/health", get(health_check))
}
