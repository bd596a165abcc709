//! Tool server configuration
//!
//! The agent talks to two JSON-RPC tool servers: a catalog search endpoint
//! and an order lifecycle endpoint (creation + status).

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tool server endpoints and call budget
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    /// Catalog search tool server URL
    pub catalog_endpoint: String,

    /// Order lifecycle tool server URL (create_order / get_order_status)
    pub orders_endpoint: String,

    /// Per-call request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ToolsConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate tool server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.catalog_endpoint) {
            return Err(ValidationError::InvalidToolEndpoint("catalog_endpoint"));
        }
        if !is_http_url(&self.orders_endpoint) {
            return Err(ValidationError::InvalidToolEndpoint("orders_endpoint"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_timeout() -> u64 {
    30
}
