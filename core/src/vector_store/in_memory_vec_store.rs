use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{cosine_similarity, Metadata, RetrievalMatch, VectorStore, VectorStoreError};
use crate::embeddings::EmbeddingVector;

#[derive(Debug, Clone)]
struct StoredVector {
    values: EmbeddingVector,
    metadata: Metadata,
}

/// Process-local vector store ranking by cosine similarity.
///
/// Writes are visible to queries immediately, so it needs no consistency delay.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    vectors: RwLock<HashMap<String, StoredVector>>,
}

impl InMemoryVectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.vectors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.vectors.read().await.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(
        &self,
        id: &str,
        vector: EmbeddingVector,
        metadata: Metadata,
    ) -> Result<(), VectorStoreError> {
        let mut vectors = self.vectors.write().await;
        vectors.insert(
            id.to_string(),
            StoredVector {
                values: vector,
                metadata,
            },
        );
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievalMatch>, VectorStoreError> {
        let vectors = self.vectors.read().await;
        let mut results = vectors
            .iter()
            .map(|(id, stored)| RetrievalMatch {
                id: id.clone(),
                score: cosine_similarity(vector, &stored.values),
                metadata: include_metadata.then(|| stored.metadata.clone()),
            })
            .collect::<Vec<_>>();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);
        Ok(results)
    }
}
