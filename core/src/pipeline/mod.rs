pub mod augment;
pub mod ingest;
pub mod retrieve;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::completion::{CompletionModel, GenerationError};
use crate::config::{Credentials, RagConfig};
use crate::document::Document;
use crate::embeddings::{model::EmbeddingModel, EmbedderError, EmbeddingVector};
use crate::error::Error;
use crate::providers::{completions::Gemini, embeddings::GeminiEmbedding};
use crate::vector_store::{
    pinecone::{PineconeConfig, PineconeVectorStore},
    VectorStore, VectorStoreError,
};
use ingest::IngestionError;

/// Steps of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    EmbedQuery,
    Retrieve,
    Augment,
    Generate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ingest => "ingest",
            Stage::EmbedQuery => "embed-query",
            Stage::Retrieve => "retrieve",
            Stage::Augment => "augment",
            Stage::Generate => "generate",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RagAnswer {
    pub query: String,
    /// Retrieved contexts, most similar first.
    pub documents: Vec<Document>,
    /// The exact prompt sent to the model.
    pub prompt: String,
    pub answer: String,
}

impl fmt::Display for RagAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============================================")?;
        writeln!(f, "QUESTION: {}", self.query)?;
        writeln!(f, "============================================")?;
        writeln!(f)?;
        writeln!(f, "--- Retrieved contexts ---")?;
        if self.documents.is_empty() {
            writeln!(f, "(none)")?;
        }
        for (i, doc) in self.documents.iter().enumerate() {
            writeln!(f, "[{}] ID: {}, Content: \"{}\"", i + 1, doc.id(), doc.content())?;
        }
        writeln!(f)?;
        writeln!(f, "--- Generated answer ---")?;
        write!(f, "{}", self.answer)
    }
}

/// Embed → retrieve → augment → generate, one call at a time.
///
/// The three providers are only used through their traits, so any of them can
/// be swapped for another implementation.
pub struct RagPipeline {
    embedder: Arc<dyn EmbeddingModel>,
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn CompletionModel>,
    config: RagConfig,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingModel>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn CompletionModel>,
        config: RagConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            generator,
            config,
        }
    }

    /// Wires Gemini (embedding and generation) and Pinecone together, sharing
    /// one HTTP client.
    ///
    /// # Errors
    /// `Error::VectorStoreSetup` when the configured index host is invalid.
    pub fn gemini_pinecone(credentials: &Credentials, config: RagConfig) -> Result<Self, Error> {
        let client = reqwest::Client::new();
        let embedder = GeminiEmbedding::with_client(
            client.clone(),
            credentials.gemini_api_key.clone(),
            config.embedding_model.clone(),
        );
        let generator = Gemini::with_client(
            client.clone(),
            credentials.gemini_api_key.clone(),
            config.generation_model.clone(),
        );
        info!(
            embedding_model = %config.embedding_model,
            generation_model = %config.generation_model,
            "Gemini client started"
        );
        let store = PineconeVectorStore::with_client(
            client,
            PineconeConfig {
                api_key: credentials.pinecone_api_key.clone(),
                host: config.index_host.clone(),
                namespace: config.namespace.clone(),
            },
        )
        .map_err(Error::VectorStoreSetup)?;

        Ok(Self::new(
            Arc::new(embedder),
            Arc::new(store),
            Arc::new(generator),
            config,
        ))
    }

    #[must_use]
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Stores `doc` and waits out the configured consistency delay.
    ///
    /// # Errors
    /// `IngestionError` naming the document and the failing step.
    pub async fn ingest(&self, doc: &Document) -> Result<(), IngestionError> {
        ingest::ingest(
            self.embedder.as_ref(),
            self.store.as_ref(),
            doc,
            self.config.consistency_delay,
        )
        .await
    }

    /// # Errors
    /// Whatever the embedding model reports, `EmptyEmbedding` included.
    pub async fn embed_query(&self, query: &str) -> Result<EmbeddingVector, EmbedderError> {
        self.embedder.embed(query).await
    }

    /// # Errors
    /// `VectorStoreError::StoreQuery` when the store can't be queried.
    pub async fn retrieve(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<Document>, VectorStoreError> {
        retrieve::retrieve(self.store.as_ref(), query_vector, top_k).await
    }

    #[must_use]
    pub fn build_prompt(&self, query: &str, docs: &[Document]) -> String {
        augment::build_prompt(query, docs)
    }

    /// # Errors
    /// `GenerationError` for transport or provider failures.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.generator.generate(prompt, &self.config.generation).await
    }

    /// Answers `query` from the contexts already in the store.
    ///
    /// # Errors
    /// The first failing stage ends the run; nothing partial is returned.
    pub async fn answer(&self, query: &str) -> Result<RagAnswer, Error> {
        info!(stage = %Stage::EmbedQuery, "Embedding the question");
        let query_vector = self.embed_query(query).await?;

        info!(stage = %Stage::Retrieve, top_k = self.config.top_k, "Searching for relevant context");
        let documents = self
            .retrieve(&query_vector, self.config.top_k)
            .await
            .map_err(Error::Retrieval)?;

        info!(stage = %Stage::Augment, contexts = documents.len(), "Building prompt");
        let prompt = self.build_prompt(query, &documents);

        info!(stage = %Stage::Generate, "Calling the model with the RAG prompt");
        let answer = self.generate(&prompt).await?;

        Ok(RagAnswer {
            query: query.to_string(),
            documents,
            prompt,
            answer,
        })
    }

    /// Ingests `doc` first when given, then answers `query`.
    ///
    /// # Errors
    /// See [`RagPipeline::ingest`] and [`RagPipeline::answer`].
    pub async fn run(&self, query: &str, doc: Option<&Document>) -> Result<RagAnswer, Error> {
        if let Some(doc) = doc {
            info!(stage = %Stage::Ingest, doc_id = doc.id(), "Ingesting document");
            self.ingest(doc).await?;
        }
        self.answer(query).await
    }
}
