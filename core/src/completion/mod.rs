use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Answer returned when the model produced no candidate, or a candidate
/// without any content.
pub const FALLBACK_ANSWER: &str = "No answer could be generated or the response is empty.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("Generation provider error -> HTTP Status {0}: {1}")]
    ProviderError(u16, String),
    #[error("Generation request failed: {0}")]
    RequestError(String),
    #[error("Failed to parse generation response: {0}")]
    ParseError(String),
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Sampling randomness.
    pub temperature: f32,
    /// Candidate pool size per sampling step.
    pub top_k: f32,
    /// Nucleus sampling mass.
    pub top_p: f32,
    /// Hard cap on the generated length.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40.0,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generate a reply to `prompt`.
    ///
    /// Implementations return [`FALLBACK_ANSWER`] rather than an error when
    /// the provider answers successfully but without any text.
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, GenerationError>;
}
