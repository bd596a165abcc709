//! Tool server adapters.
//!
//! Implementations of the ToolGateway port.
//!
//! ## Available Adapters
//!
//! - `JsonRpcToolGateway` - JSON-RPC 2.0 `tools/call` over HTTP
//! - `MockToolGateway` - Scripted mock for testing

mod jsonrpc_gateway;
mod mock_gateway;

pub use jsonrpc_gateway::JsonRpcToolGateway;
pub use mock_gateway::{MockToolGateway, RecordedCall};
