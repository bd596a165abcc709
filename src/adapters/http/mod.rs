//! HTTP adapters - the request boundary.

pub mod agent;

pub use agent::{agent_routes, AgentAppState};
