use crate::{
    completion::GenerationError, config::ConfigError, embeddings::EmbedderError,
    pipeline::ingest::IngestionError, vector_store::VectorStoreError,
};
use thiserror::Error;

/// Failure of a pipeline run, tagged with the stage that failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Vector store setup failed: {0}")]
    VectorStoreSetup(VectorStoreError),
    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),
    #[error("Failed to embed the question: {0}")]
    QueryEmbedding(#[from] EmbedderError),
    #[error("Failed to retrieve context: {0}")]
    Retrieval(VectorStoreError),
    #[error("Failed to generate the answer: {0}")]
    Generation(#[from] GenerationError),
}
