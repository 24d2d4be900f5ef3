//! Start-up shared by the `populate` and `query` binaries.

use gemrag::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Document written to the index by `populate`.
pub const DOCUMENT_ID: &str = "doc-golang-origin";
pub const DOCUMENT_CONTENT: &str = "Go (also known as Golang) was designed at Google by Robert Griesemer, Rob Pike, and Ken Thompson. Its first public version was released in November 2009.";

/// Question asked by `query`.
pub const QUESTION: &str = "Who are the creators of Go and when was it released?";

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads credentials and settings from the environment and connects the
/// Gemini and Pinecone clients.
///
/// # Errors
/// `Error::Config` when an API key or the index host is missing, `Error::VectorStoreSetup` for
/// an unusable index host.
pub fn connect() -> Result<RagPipeline, Error> {
    let credentials = Credentials::from_env()?;
    let config = RagConfig::from_env()?;
    info!(index_host = %config.index_host, "Connecting clients");
    RagPipeline::gemini_pinecone(&credentials, config)
}

#[must_use]
pub fn document() -> Document {
    Document::new_with_id(DOCUMENT_ID, DOCUMENT_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemrag::pipeline::augment::build_prompt;

    #[test]
    fn test_document_answers_question() {
        let doc = document();
        assert_eq!(doc.id(), DOCUMENT_ID);
        assert!(doc.content().contains("November 2009"));

        let prompt = build_prompt(QUESTION, &[doc]);
        assert!(prompt.contains(DOCUMENT_CONTENT));
        assert!(prompt.ends_with(QUESTION));
    }
}
