use crate::cli::{
    actions::{
        login::{Args, PayloadSource},
        Action,
    },
    commands::{ARG_ENDPOINT, ARG_PAYLOAD, ARG_PAYLOAD_FILE, ARG_QUERY, ARG_TIMEOUT},
};
use anyhow::{bail, Context, Result};
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let endpoint = matches
        .get_one::<String>(ARG_ENDPOINT)
        .cloned()
        .context("missing required argument: --endpoint")?;

    let timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .map(Duration::from_secs);

    let source = if let Some(raw) = matches.get_one::<String>(ARG_PAYLOAD) {
        PayloadSource::Inline(raw.clone())
    } else if let Some(path) = matches.get_one::<String>(ARG_PAYLOAD_FILE) {
        if path == "-" {
            PayloadSource::Stdin
        } else {
            PayloadSource::File(path.into())
        }
    } else if let Some(query) = matches.get_one::<String>(ARG_QUERY) {
        PayloadSource::Query(query.clone())
    } else {
        bail!("missing payload: use --payload, --payload-file or --query");
    };

    Ok(Action::Login(Args {
        endpoint,
        timeout,
        source,
    }))
}
