use crate::embeddings::{EmbedderError, EmbeddingVector};
use async_trait::async_trait;

/// Turns text into a single embedding vector.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    async fn embed(&self, data: &str) -> Result<EmbeddingVector, EmbedderError>;
}
