use std::process::ExitCode;

use gemrag_cli::{connect, init_tracing, QUESTION};
use tracing::error;

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

    match pipeline.answer(QUESTION).await {
        Ok(answer) => {
            println!("{answer}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
