//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `STOREFRONT` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use storefront_agent::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod knowledge;
mod server;
mod tools;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use knowledge::KnowledgeConfig;
pub use server::{Environment, ServerConfig};
pub use tools::ToolsConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the storefront agent.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Tool server endpoints (catalog + orders)
    pub tools: ToolsConfig,

    /// Knowledge base / RAG configuration
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STOREFRONT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STOREFRONT__SERVER__PORT=8002` -> `server.port = 8002`
    /// - `STOREFRONT__TOOLS__CATALOG_ENDPOINT=...` -> `tools.catalog_endpoint = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing
    /// or values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STOREFRONT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.tools.validate()?;
        self.knowledge.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var(
            "STOREFRONT__TOOLS__CATALOG_ENDPOINT",
            "https://shop.example.com/api/mcp",
        );
        env::set_var(
            "STOREFRONT__TOOLS__ORDERS_ENDPOINT",
            "https://orders.example.com/api/mcp",
        );
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("STOREFRONT__TOOLS__CATALOG_ENDPOINT");
        env::remove_var("STOREFRONT__TOOLS__ORDERS_ENDPOINT");
        env::remove_var("STOREFRONT__SERVER__PORT");
        env::remove_var("STOREFRONT__SERVER__ENVIRONMENT");
        env::remove_var("STOREFRONT__AI__GEMINI_API_KEY");
        env::remove_var("STOREFRONT__KNOWLEDGE__TOP_K");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.tools.catalog_endpoint, "https://shop.example.com/api/mcp");
        assert_eq!(config.tools.orders_endpoint, "https://orders.example.com/api/mcp");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8002);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("STOREFRONT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("STOREFRONT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
