//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the workflow core and the outside world. Adapters implement these ports.
//!
//! - `LanguageModel` - text-completion capability (prompt in, text out)
//! - `ToolGateway` - JSON-RPC-style tool server invocation
//! - `KnowledgeIndex` - top-k similarity retrieval over an embedding index

mod knowledge_index;
mod language_model;
mod tool_gateway;

pub use knowledge_index::{KnowledgeError, KnowledgeIndex, RetrievedDocument};
pub use language_model::{AiError, LanguageModel};
pub use tool_gateway::{ToolCallResult, ToolGateway};
