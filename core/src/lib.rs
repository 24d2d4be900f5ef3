//! # gemrag
//!
//! A small retrieval-augmented-generation pipeline: documents are embedded
//! with Gemini, stored in a Pinecone index, and questions are answered by
//! Gemini using the closest documents as context.
//!
//! ## Pieces
//!
//! - **Embedding models** ([`embeddings::model::EmbeddingModel`]): text to vector
//! - **Vector stores** ([`vector_store::VectorStore`]): upsert and top-k query
//!   (Pinecone, or in-memory)
//! - **Completion models** ([`completion::CompletionModel`]): prompt to answer
//! - **Pipeline** ([`pipeline::RagPipeline`]): ingest, then embed the question,
//!   retrieve, build the prompt and generate, strictly one step after another
//!
//! ## Answering a question
//!
//! ```rust,no_run
//! use gemrag::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let credentials = Credentials::from_env()?;
//!     let pipeline = RagPipeline::gemini_pinecone(&credentials, RagConfig::from_env()?)?;
//!
//!     let doc = Document::new_with_id("doc-1", "Go was created at Google in 2009.");
//!     pipeline.ingest(&doc).await?;
//!
//!     let answer = pipeline.answer("When was Go created?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```
//!
//! ## Swapping providers
//!
//! Every provider sits behind a trait, so tests and demos can run the same
//! pipeline against local implementations:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gemrag::prelude::*;
//! use gemrag::providers::{completions::Gemini, embeddings::GeminiEmbedding};
//!
//! let key = std::env::var("GEMINI_API_KEY").unwrap();
//! let pipeline = RagPipeline::new(
//!     Arc::new(GeminiEmbedding::new(key.clone(), "models/embedding-001")),
//!     Arc::new(InMemoryVectorStore::new()),
//!     Arc::new(Gemini::new(key, "gemini-2.5-flash")),
//!     RagConfig::default().with_consistency_delay(std::time::Duration::ZERO),
//! );
//! ```

/// Text generation models and their sampling parameters
pub mod completion;

/// Settings and credentials
pub mod config;

/// The text records flowing through the pipeline
pub mod document;

/// Text embeddings support
pub mod embeddings;

/// Error types for all library operations
pub mod error;

/// Ingestion, retrieval, prompt building and their orchestration
pub mod pipeline;

/// Convenience prelude exports
pub mod prelude;

/// Builtin completion and embedding model providers
pub mod providers;

/// Vector storage and retrieval
pub mod vector_store;
