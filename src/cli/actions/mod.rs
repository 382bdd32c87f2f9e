pub mod login;

// Internal "interpreter" for `Action`.
mod run;

use std::process::ExitCode;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action cannot run; a rejected login is not an
    /// error and is reported through the exit code.
    pub async fn execute(self) -> anyhow::Result<ExitCode> {
        run::execute(self).await
    }
}
