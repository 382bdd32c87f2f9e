use crate::{AuthCallback, ConsoleNotifier, Notifier, Outcome, UserPayload};
use anyhow::{Context, Result};
use std::{path::PathBuf, process::ExitCode, time::Duration};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub source: PayloadSource,
}

/// Where the widget user object comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Inline(String),
    File(PathBuf),
    Stdin,
    Query(String),
}

impl PayloadSource {
    /// # Errors
    /// Returns an error if the payload cannot be read or parsed.
    pub async fn load(&self) -> Result<UserPayload> {
        let payload = match self {
            Self::Inline(raw) => UserPayload::from_json_str(raw)?,
            Self::File(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read payload from {}", path.display()))?;
                UserPayload::from_json_str(&raw)
                    .with_context(|| format!("Invalid payload in {}", path.display()))?
            }
            Self::Stdin => {
                let mut raw = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut raw)
                    .await
                    .context("Failed to read payload from stdin")?;
                UserPayload::from_json_str(&raw).context("Invalid payload on stdin")?
            }
            Self::Query(query) => UserPayload::from_query(query)?,
        };

        Ok(payload)
    }

    fn describe(&self) -> String {
        match self {
            Self::Inline(_) => "inline".to_string(),
            Self::File(path) => format!("file:{}", path.display()),
            Self::Stdin => "stdin".to_string(),
            Self::Query(_) => "query".to_string(),
        }
    }
}

/// Execute the login action.
/// # Errors
/// Returns an error if the payload cannot be loaded or the endpoint is invalid.
pub async fn execute(args: Args) -> Result<ExitCode> {
    let outcome = login(args, &ConsoleNotifier::stdout()).await?;

    if outcome.is_verified() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn login<N>(args: Args, notifier: &N) -> Result<Outcome>
where
    N: Notifier + ?Sized,
{
    log_startup_args(&args);

    let mut builder = AuthCallback::builder().endpoint(args.endpoint.as_str());
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    let callback = builder.build().context("Could not set up the login callback")?;

    let payload = args.source.load().await?;

    debug!("payload keys: {}", payload_keys(&payload).join(", "));

    Ok(callback.on_telegram_auth(payload, notifier).await)
}

// Values stay out of the logs, `hash` included.
fn payload_keys(payload: &UserPayload) -> Vec<&str> {
    payload
        .as_value()
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn redact_endpoint(endpoint: &str) -> String {
    match Url::parse(endpoint) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-endpoint".to_string(),
    }
}

fn startup_entries(args: &Args) -> [(&'static str, String); 3] {
    [
        ("endpoint", redact_endpoint(&args.endpoint)),
        (
            "timeout",
            args.timeout
                .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs())),
        ),
        ("payload", args.source.describe()),
    ]
}

fn log_startup_args(args: &Args) {
    let entries = startup_entries(args);

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "tgauth {} - {}:",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
