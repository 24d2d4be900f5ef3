pub(crate) mod gemini;

pub use gemini::GeminiEmbeddingModel as GeminiEmbedding;
pub use gemini::DEFAULT_MODEL;
