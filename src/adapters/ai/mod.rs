//! Language model adapters.
//!
//! Implementations of the LanguageModel port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Generative Language API
//! - `UnconfiguredModel` - Placeholder when no credential is configured
//! - `MockLanguageModel` - Scripted mock for testing

mod gemini_provider;
mod mock_provider;
mod unconfigured;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::MockLanguageModel;
pub use unconfigured::UnconfiguredModel;
