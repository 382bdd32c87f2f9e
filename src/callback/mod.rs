//! The widget callback: forward the payload, show the verdict.

mod error;
pub use self::error::CallbackError;

use crate::{
    notify::{Notice, Notifier},
    widget::UserPayload,
    APP_USER_AGENT, DEFAULT_ENDPOINT,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Posts widget payloads to the authentication endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AuthCallback {
    client: Client,
    endpoint: Url,
}

impl AuthCallback {
    /// # Errors
    /// Returns an error if `endpoint` is not an http(s) URL with a host, or
    /// the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, CallbackError> {
        Self::builder().endpoint(endpoint).build()
    }

    #[must_use]
    pub fn builder() -> AuthCallbackBuilder {
        AuthCallbackBuilder::default()
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one `POST` with the payload as a JSON body.
    ///
    /// Only the status is consulted; the response body is ignored.
    ///
    /// # Errors
    /// Returns [`CallbackError::Status`] for a non-2xx response and
    /// [`CallbackError::Transport`] if no response was received.
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint))]
    pub async fn login(&self, payload: &UserPayload) -> Result<StatusCode, CallbackError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();

        debug!("login response status: {}", status);

        if status.is_success() {
            Ok(status)
        } else {
            Err(CallbackError::Status(status))
        }
    }

    /// Run the full callback for one widget invocation.
    ///
    /// Exactly one notice is shown: [`Notice::Verified`] on a 2xx response,
    /// [`Notice::Error`] on any other status and on transport failure. A
    /// notifier failure is logged and does not change the outcome.
    pub async fn on_telegram_auth<N>(&self, payload: UserPayload, notifier: &N) -> Outcome
    where
        N: Notifier + ?Sized,
    {
        let result = self.login(&payload).await;

        let notice = match &result {
            Ok(status) => {
                info!("User is verified: {}", status);
                Notice::Verified
            }
            Err(e @ CallbackError::Status(_)) => {
                error!("Telegram login rejected: {}", e);
                Notice::Error
            }
            Err(e) => {
                error!("Telegram login failed: {:?}", e);
                Notice::Error
            }
        };

        if let Err(e) = notifier.notify(notice) {
            warn!("Could not show notice {:?}: {}", notice.message(), e);
        }

        Outcome { notice, result }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthCallbackBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl AuthCallbackBuilder {
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Total request timeout. Unset means wait for as long as it takes.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// # Errors
    /// Returns an error if the endpoint is invalid or the HTTP client cannot
    /// be built.
    pub fn build(self) -> Result<AuthCallback, CallbackError> {
        let endpoint = parse_endpoint(self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;

        let mut builder = Client::builder().user_agent(APP_USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CallbackError::Client)?;

        Ok(AuthCallback { client, endpoint })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, CallbackError> {
    let url = Url::parse(raw).map_err(|e| CallbackError::Endpoint(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(CallbackError::Endpoint(format!(
                "{raw}: unsupported scheme {scheme}"
            )))
        }
    }

    if url.host().is_none() {
        return Err(CallbackError::Endpoint(format!("{raw}: no host specified")));
    }

    Ok(url)
}

/// What happened during one callback invocation.
#[derive(Debug)]
pub struct Outcome {
    notice: Notice,
    result: Result<StatusCode, CallbackError>,
}

impl Outcome {
    #[must_use]
    pub const fn notice(&self) -> Notice {
        self.notice
    }

    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self.notice, Notice::Verified)
    }

    /// Response status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match &self.result {
            Ok(status) => Some(*status),
            Err(e) => e.status(),
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&CallbackError> {
        self.result.as_ref().err()
    }

    /// # Errors
    /// Returns the failure that produced [`Notice::Error`].
    pub fn into_result(self) -> Result<StatusCode, CallbackError> {
        self.result
    }
}
