//! Knowledge Index Port - Interface for similarity retrieval.
//!
//! The info handler retrieves grounding context from a persisted embedding
//! index. Ingestion (document loading, chunking, upsert) happens out of
//! process; this port only covers top-k similarity search by query string.

use async_trait::async_trait;
use thiserror::Error;

/// Port for similarity search over a persisted embedding index.
#[async_trait]
pub trait KnowledgeIndex: Send + Sync {
    /// Retrieve the `k` chunks most similar to `query`.
    ///
    /// An empty result is a legitimate answer, not an error; callers use a
    /// one-item probe to distinguish "empty index" from "no good match".
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, KnowledgeError>;
}

/// One retrieved chunk with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedDocument {
    /// Chunk text.
    pub content: String,
    /// Source identifier (document path/URL), if recorded at ingestion.
    pub source: Option<String>,
    /// Similarity score as reported by the index.
    pub score: f32,
}

impl RetrievedDocument {
    /// Creates a retrieved chunk.
    pub fn new(content: impl Into<String>, source: Option<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            source,
            score,
        }
    }
}

/// Knowledge retrieval errors.
#[derive(Debug, Clone, Error)]
pub enum KnowledgeError {
    /// A required credential or index setting is absent.
    #[error("missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// The index exists but holds no vectors.
    #[error("knowledge index appears to be empty")]
    EmptyIndex,

    /// Embedding the query failed.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// Network or index-side failure during search.
    #[error("retrieval failed: {0}")]
    Retrieval(String),
}

impl KnowledgeError {
    /// Creates an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Creates a retrieval error.
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval(message.into())
    }
}
