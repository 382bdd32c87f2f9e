use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("endpoint responded with {0}")]
    Status(StatusCode),
    #[error("request failed")]
    Transport(#[from] reqwest::Error),
}

impl CallbackError {
    /// Status returned by the endpoint, if the request got that far.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
