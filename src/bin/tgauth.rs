use anyhow::Result;
use std::process::ExitCode;
use tgauth::cli;

// Main function
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let action = cli::start()?;

    let exit_code = action.execute().await;

    cli::telemetry::shutdown_tracer();

    exit_code
}
