use std::process::ExitCode;

use gemrag_cli::{connect, document, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let pipeline = match connect() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let doc = document();
    if let Err(e) = pipeline.ingest(&doc).await {
        error!("Failed to insert document: {e}");
        return ExitCode::FAILURE;
    }

    info!(doc_id = doc.id(), "Document inserted in Pinecone");
    ExitCode::SUCCESS
}
