//! Mock knowledge index for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{KnowledgeError, KnowledgeIndex, RetrievedDocument};

/// Mock knowledge index with a fixed document set or scripted error.
#[derive(Debug, Clone, Default)]
pub struct MockKnowledgeIndex {
    documents: Vec<RetrievedDocument>,
    error: Option<KnowledgeError>,
    queries: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockKnowledgeIndex {
    /// An index that returns no matches for any query (empty index).
    pub fn empty() -> Self {
        Self::default()
    }

    /// An index holding `documents`; every search returns the first `k`.
    pub fn with_documents(documents: Vec<RetrievedDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    /// An index that fails every search with `error`.
    pub fn failing(error: KnowledgeError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Queries received so far as `(query, k)` pairs.
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeIndex for MockKnowledgeIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>, KnowledgeError> {
        self.queries.lock().unwrap().push((query.to_string(), k));

        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.documents.iter().take(k).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_index_returns_no_matches() {
        let index = MockKnowledgeIndex::empty();
        assert!(index.search("anything", 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_first_k_documents() {
        let index = MockKnowledgeIndex::with_documents(vec![
            RetrievedDocument::new("a", None, 0.9),
            RetrievedDocument::new("b", None, 0.8),
            RetrievedDocument::new("c", None, 0.7),
        ]);

        let results = index.search("q", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "a");
    }

    #[tokio::test]
    async fn scripted_error_is_returned() {
        let index = MockKnowledgeIndex::failing(KnowledgeError::retrieval("index down"));
        assert!(index.search("q", 8).await.is_err());
    }

    #[tokio::test]
    async fn records_queries() {
        let index = MockKnowledgeIndex::empty();
        index.search("probe", 1).await.unwrap();
        index.search("real question", 8).await.unwrap();

        let queries = index.queries();
        assert_eq!(queries, vec![("probe".to_string(), 1), ("real question".to_string(), 8)]);
    }
}
