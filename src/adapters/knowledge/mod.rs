//! Knowledge index adapters.
//!
//! Implementations of the KnowledgeIndex port.
//!
//! ## Available Adapters
//!
//! - `PineconeIndex` - embed via Generative Language API, query via Pinecone REST
//! - `MockKnowledgeIndex` - Scripted mock for testing

mod mock_index;
mod pinecone_index;

pub use mock_index::MockKnowledgeIndex;
pub use pinecone_index::{PineconeConfig, PineconeIndex};
