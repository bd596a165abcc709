//! Pinecone index adapter - Implementation of KnowledgeIndex over REST.
//!
//! Retrieval is two hops: embed the query string through the Generative
//! Language `embedContent` endpoint, then POST the vector to the index
//! host's `/query` route. Chunk text and provenance ride in each match's
//! `metadata` (`text` / `source`), as written by the ingestion pipeline.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::ports::{KnowledgeError, KnowledgeIndex, RetrievedDocument};

/// Configuration for the Pinecone-backed index.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    /// Index API key.
    index_api_key: Secret<String>,
    /// Index query host, e.g. `https://store-kb-abc123.svc.pinecone.io`.
    pub index_host: String,
    /// Embedding API key.
    embedding_api_key: Secret<String>,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Base URL of the embedding API.
    pub embedding_base_url: String,
    /// Request timeout for both hops.
    pub timeout: Duration,
}

impl PineconeConfig {
    /// Creates a configuration from the two credentials and the index host.
    pub fn new(
        index_api_key: impl Into<String>,
        index_host: impl Into<String>,
        embedding_api_key: impl Into<String>,
    ) -> Self {
        Self {
            index_api_key: Secret::new(index_api_key.into()),
            index_host: index_host.into(),
            embedding_api_key: Secret::new(embedding_api_key.into()),
            embedding_model: "text-embedding-004".to_string(),
            embedding_base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Sets the embedding API base URL.
    pub fn with_embedding_base_url(mut self, url: impl Into<String>) -> Self {
        self.embedding_base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Pinecone-backed implementation of the KnowledgeIndex port.
pub struct PineconeIndex {
    config: PineconeConfig,
    client: Client,
}

impl PineconeIndex {
    /// Creates a new index adapter with the given configuration.
    pub fn new(config: PineconeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:embedContent",
            self.config.embedding_base_url, self.config.embedding_model
        )
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.config.index_host.trim_end_matches('/'))
    }

    /// Embeds `query` into a similarity vector.
    async fn embed(&self, query: &str) -> Result<Vec<f32>, KnowledgeError> {
        let request = json!({
            "model": format!("models/{}", self.config.embedding_model),
            "content": {"parts": [{"text": query}]}
        });

        let response = self
            .client
            .post(self.embed_url())
            .header("x-goog-api-key", self.config.embedding_api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KnowledgeError::embedding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KnowledgeError::embedding(format!("status {}", status)));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| KnowledgeError::embedding(e.to_string()))?;

        if parsed.embedding.values.is_empty() {
            return Err(KnowledgeError::embedding("empty embedding vector"));
        }
        Ok(parsed.embedding.values)
    }
}

#[async_trait]
impl KnowledgeIndex for PineconeIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, KnowledgeError> {
        let vector = self.embed(query).await?;

        let request = QueryRequest {
            vector,
            top_k: k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(self.query_url())
            .header("Api-Key", self.config.index_api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KnowledgeError::retrieval(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KnowledgeError::retrieval(format!("status {}", status)));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| KnowledgeError::retrieval(e.to_string()))?;

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| {
                let metadata = m.metadata.unwrap_or_default();
                RetrievedDocument::new(metadata.text.unwrap_or_default(), metadata.source, m.score)
            })
            .collect())
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    #[serde(default)]
    score: f32,
    metadata: Option<MatchMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchMetadata {
    text: Option<String>,
    source: Option<String>,
}
