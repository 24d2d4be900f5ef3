pub mod in_memory_vec_store;
pub mod pinecone;

pub use in_memory_vec_store::InMemoryVectorStore;
pub use pinecone::PineconeVectorStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::embeddings::EmbeddingVector;

/// Metadata key holding the text a vector was generated from.
pub const CONTENT_KEY: &str = "content";

/// String-keyed metadata stored alongside a vector.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VectorStoreError {
    #[error("Invalid index host `{0}`")]
    InvalidHost(String),
    #[error("Failed to upsert vector: {0}")]
    StoreWrite(String),
    #[error("Failed to query vectors: {0}")]
    StoreQuery(String),
    #[error("Match `{id}` has malformed metadata: {reason}")]
    MetadataShape { id: String, reason: String },
}

/// A single nearest-neighbour hit as reported by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalMatch {
    pub id: String,
    pub score: f32,
    pub metadata: Option<Metadata>,
}

impl RetrievalMatch {
    /// Returns the stored `content` text of this match.
    ///
    /// # Errors
    /// `VectorStoreError::MetadataShape` when the metadata is missing, has no
    /// `content` key, or `content` is not a string.
    pub fn content(&self) -> Result<&str, VectorStoreError> {
        let shape_error = |reason: &str| VectorStoreError::MetadataShape {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        let metadata = self
            .metadata
            .as_ref()
            .ok_or_else(|| shape_error("no metadata returned"))?;
        match metadata.get(CONTENT_KEY) {
            Some(serde_json::Value::String(content)) => Ok(content),
            Some(_) => Err(shape_error("`content` is not a string")),
            None => Err(shape_error("`content` is missing")),
        }
    }
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Inserts or overwrites the vector stored under `id`. Resolves once the
    /// store acknowledged the write, which doesn't imply it is queryable yet.
    async fn upsert(
        &self,
        id: &str,
        vector: EmbeddingVector,
        metadata: Metadata,
    ) -> Result<(), VectorStoreError>;

    /// Returns at most `top_k` matches, most similar first.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievalMatch>, VectorStoreError>;
}

pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
