pub use crate::completion::{CompletionModel, GenerationConfig, GenerationError, FALLBACK_ANSWER};
pub use crate::config::{ConfigError, Credentials, RagConfig};
pub use crate::document::Document;
pub use crate::embeddings::{model::EmbeddingModel, EmbedderError, EmbeddingVector};
pub use crate::error::Error;
pub use crate::pipeline::{ingest::IngestionError, RagAnswer, RagPipeline, Stage};
pub use crate::vector_store::{
    InMemoryVectorStore, Metadata, PineconeVectorStore, RetrievalMatch, VectorStore, VectorStoreError,
};
