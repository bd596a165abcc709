//! Adapters - Implementations of ports against real infrastructure.
//!
//! Each submodule implements one port (plus a mock for tests), keeping the
//! workflow core free of HTTP and vendor details.

pub mod ai;
pub mod http;
pub mod knowledge;
pub mod tools;

pub use ai::{GeminiConfig, GeminiProvider, MockLanguageModel, UnconfiguredModel};
pub use knowledge::{MockKnowledgeIndex, PineconeConfig, PineconeIndex};
pub use tools::{JsonRpcToolGateway, MockToolGateway};
