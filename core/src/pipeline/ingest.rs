use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::document::Document;
use crate::embeddings::{model::EmbeddingModel, EmbedderError};
use crate::vector_store::{Metadata, VectorStore, VectorStoreError, CONTENT_KEY};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IngestionError {
    #[error("failed to embed document `{id}`: {source}")]
    Embedding { id: String, source: EmbedderError },
    #[error("failed to upsert document `{id}`: {source}")]
    Upsert { id: String, source: VectorStoreError },
}

/// Embeds `doc`, stores it under its id with its text as `content` metadata,
/// then waits `consistency_delay` so the write becomes queryable.
///
/// Re-ingesting an id overwrites the previous vector and metadata.
pub async fn ingest(
    embedder: &dyn EmbeddingModel,
    store: &dyn VectorStore,
    doc: &Document,
    consistency_delay: Duration,
) -> Result<(), IngestionError> {
    info!(doc_id = doc.id(), "1. Generating embedding for document");
    let vector = embedder
        .embed(doc.content())
        .await
        .map_err(|source| IngestionError::Embedding {
            id: doc.id().to_string(),
            source,
        })?;

    info!(doc_id = doc.id(), dimension = vector.len(), "2. Upserting vector");
    let mut metadata = Metadata::new();
    metadata.insert(CONTENT_KEY.to_string(), doc.content().into());
    store
        .upsert(doc.id(), vector, metadata)
        .await
        .map_err(|source| IngestionError::Upsert {
            id: doc.id().to_string(),
            source,
        })?;

    info!(doc_id = doc.id(), "3. Document stored");
    if !consistency_delay.is_zero() {
        tokio::time::sleep(consistency_delay).await;
    }
    Ok(())
}
