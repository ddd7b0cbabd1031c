//! staticprep - fail-fast provisioning runner for web app deploys

use clap::Parser;

use staticprep::cli::Cli;
use staticprep::domain::error::StepError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

/// A failed external command's own status becomes the process exit code;
/// everything else exits 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<StepError>().map_or(1, StepError::exit_code)
}
