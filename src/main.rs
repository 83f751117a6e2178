use std::process::ExitCode;
use test_matrix::{cli, infra::logging};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    logging::configure_color();

    match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
