//! Lumen release builder binary.
//!
//! Builds both Windows architecture variants of Lumen, packages them and
//! compiles the distributable installers, with interactive recovery gates
//! and a final artifact summary.

use lumen_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // An interrupt at any point unwinds the pipeline; no partial-state
    // rollback, the next run's directory reset recovers.
    let exit_code = tokio::select! {
        result = cli::run() => match result {
            Ok(code) => code,
            Err(lumen_release::ReleaseError::Cancelled) => {
                eprintln!("\nAborted by the user.");
                1
            }
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nAborted by the user.");
            1
        }
    };

    process::exit(exit_code);
}
