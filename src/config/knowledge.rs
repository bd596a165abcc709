//! Knowledge base (RAG) configuration
//!
//! Retrieval needs three things configured: an embedding credential (shared
//! with the completion provider), a vector index credential, and an index
//! host. Any missing piece switches the info handler to its static fallback
//! instead of failing the boot.

use serde::Deserialize;

use super::error::ValidationError;

/// Vector index and retrieval configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// Vector index API key
    pub index_api_key: Option<String>,

    /// Vector index name
    pub index_name: Option<String>,

    /// Vector index query host, e.g. `https://my-index-abc123.svc.pinecone.io`
    pub index_host: Option<String>,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Number of chunks retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Store name interpolated into branded answer templates
    #[serde(default = "default_brand")]
    pub brand: String,
}

impl KnowledgeConfig {
    /// Check whether the index side of retrieval is fully configured
    pub fn has_index(&self) -> bool {
        let configured = |v: &Option<String>| v.as_ref().is_some_and(|s| !s.is_empty());
        configured(&self.index_api_key)
            && configured(&self.index_name)
            && configured(&self.index_host)
    }

    /// Validate knowledge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_k == 0 || self.top_k > 100 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            index_api_key: None,
            index_name: None,
            index_host: None,
            embedding_model: default_embedding_model(),
            top_k: default_top_k(),
            brand: default_brand(),
        }
    }
}

fn default_embedding_model() -> String {
    "text-embedding-004".to_string()
}

fn default_top_k() -> usize {
    8
}

fn default_brand() -> String {
    "Storefront".to_string()
}
