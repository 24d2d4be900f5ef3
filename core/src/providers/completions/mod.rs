pub(crate) mod gemini;

pub use gemini::GeminiCompletionModel as Gemini;
pub use gemini::DEFAULT_MODEL;
