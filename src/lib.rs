//! # tgauth (Telegram Login Widget callback)
//!
//! The Telegram Login Widget hands the signed-in user to a callback. `tgauth`
//! is that callback: it forwards the user object, unchanged, as a JSON `POST`
//! to the local authentication endpoint (`/auth/telegram/login`) and shows
//! one of two notices depending on the response status.
//!
//! - `2xx` shows **"User is verified"**.
//! - Anything else shows **"Error"**, and so does a transport failure
//!   (connection refused, DNS, timeout).
//!
//! Exactly one notice is shown per invocation. The payload is never
//! inspected or validated here; checking the Telegram hash is the
//! endpoint's job.
//!
//! ```no_run
//! use tgauth::{AuthCallback, ConsoleNotifier, UserPayload};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let callback = AuthCallback::new(tgauth::DEFAULT_ENDPOINT)?;
//! let payload = UserPayload::from_json_str(r#"{"id":123,"first_name":"Jo"}"#)?;
//! let outcome = callback
//!     .on_telegram_auth(payload, &ConsoleNotifier::stdout())
//!     .await;
//! assert!(outcome.is_verified());
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod cli;
pub mod notify;
pub mod widget;

pub use self::callback::{AuthCallback, AuthCallbackBuilder, CallbackError, Outcome};
pub use self::notify::{ConsoleNotifier, Notice, Notifier};
pub use self::widget::{PayloadError, TelegramWidgetData, UserPayload};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Where the widget callback posts to when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1/auth/telegram/login";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_app_user_agent() {
        assert!(APP_USER_AGENT.starts_with("tgauth/"));
        assert!(APP_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_default_endpoint_path() {
        assert!(DEFAULT_ENDPOINT.ends_with("/auth/telegram/login"));
    }
}
