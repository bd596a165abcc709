//! Agent HTTP surface: DTOs, handlers, and routes.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AgentApiError, AgentAppState};
pub use routes::agent_routes;
