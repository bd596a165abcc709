//! Application layer - workflow composition over domain and ports.

pub mod extraction;
pub mod handlers;
mod llm_gateway;

pub use extraction::{ExtractionRequest, ExtractionResult, Extractor};
pub use llm_gateway::LlmGateway;
