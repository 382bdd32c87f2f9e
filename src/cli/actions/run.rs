use crate::cli::actions::{login, Action};
use anyhow::Result;
use std::process::ExitCode;

/// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<ExitCode> {
    match action {
        Action::Login(args) => login::execute(args).await,
    }
}
