//! Test doubles for the three provider traits.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::completion::{CompletionModel, GenerationConfig, GenerationError};
use crate::embeddings::{model::EmbeddingModel, EmbedderError, EmbeddingVector};
use crate::vector_store::{Metadata, RetrievalMatch, VectorStore, VectorStoreError};

/// Returns the same vector for every text, or `EmptyEmbedding` when built
/// with [`FixedEmbedder::empty`].
pub(crate) struct FixedEmbedder {
    vector: Option<EmbeddingVector>,
    calls: Mutex<Vec<String>>,
}

impl FixedEmbedder {
    pub(crate) fn new(vector: EmbeddingVector) -> Self {
        Self {
            vector: Some(vector),
            calls: Mutex::new(vec![]),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            vector: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingModel for FixedEmbedder {
    async fn embed(&self, data: &str) -> Result<EmbeddingVector, EmbedderError> {
        self.calls.lock().unwrap().push(data.to_string());
        self.vector.clone().ok_or(EmbedderError::EmptyEmbedding)
    }
}

/// Deterministic bag-of-letters embedding: equal texts map to equal vectors.
pub(crate) struct LetterEmbedder;

#[async_trait]
impl EmbeddingModel for LetterEmbedder {
    async fn embed(&self, data: &str) -> Result<EmbeddingVector, EmbedderError> {
        let mut vector = vec![0.0; 26];
        for c in data.chars().filter(char::is_ascii_alphabetic) {
            vector[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        Ok(vector)
    }
}

/// Store that rejects every call.
pub(crate) struct FailingStore;

#[async_trait]
impl VectorStore for FailingStore {
    async fn upsert(&self, _: &str, _: EmbeddingVector, _: Metadata) -> Result<(), VectorStoreError> {
        Err(VectorStoreError::StoreWrite("HTTP 503: unavailable".to_string()))
    }

    async fn query(&self, _: &[f32], _: usize, _: bool) -> Result<Vec<RetrievalMatch>, VectorStoreError> {
        Err(VectorStoreError::StoreQuery("HTTP 503: unavailable".to_string()))
    }
}

/// Answers every query with a fixed match list and records the request.
pub(crate) struct ScriptedStore {
    matches: Vec<RetrievalMatch>,
    last_request: Mutex<Option<(Vec<f32>, usize, bool)>>,
}

impl ScriptedStore {
    pub(crate) fn new(matches: Vec<RetrievalMatch>) -> Self {
        Self {
            matches,
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn last_request(&self) -> Option<(Vec<f32>, usize, bool)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorStore for ScriptedStore {
    async fn upsert(&self, _: &str, _: EmbeddingVector, _: Metadata) -> Result<(), VectorStoreError> {
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievalMatch>, VectorStoreError> {
        *self.last_request.lock().unwrap() = Some((vector.to_vec(), top_k, include_metadata));
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}

/// Replies with a canned answer and keeps every prompt it was sent.
pub(crate) struct RecordingGenerator {
    reply: Result<String, GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub(crate) fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(vec![]),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for RecordingGenerator {
    async fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}
