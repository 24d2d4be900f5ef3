pub mod model;

use thiserror::Error;

/// Vector produced by an embedding model. Its length is fixed by the model and
/// has to match the dimension of the vector index it is stored in.
pub type EmbeddingVector = Vec<f32>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmbedderError {
    #[error("Embedding request failed: {0}")]
    RequestError(String),
    #[error("Embedding provider error -> HTTP Status {0}: {1}")]
    ProviderError(u16, String),
    #[error("Failed to parse embedding response: {0}")]
    ParseError(String),
    #[error("Embedding provider returned no embeddings")]
    EmptyEmbedding,
}
