/// Builtin completion models
pub mod completions;
/// Builtin embedding models
pub mod embeddings;

/// Root of the Gemini REST API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini addresses models as `models/<name>`; accept both spellings.
pub(crate) fn model_resource(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}
