use clap::{builder::ValueParser, Arg, ArgAction, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

// Index in this table is the verbosity count stored by clap.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name (case-insensitive) or a number from 0 to 5.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        if let Ok(count) = level.parse::<u8>() {
            return if count <= 5 {
                Ok(count)
            } else {
                Err(format!("log level {count} out of range (0-5)"))
            };
        }

        let level = level.to_ascii_lowercase();
        LEVEL_NAMES
            .iter()
            .position(|name| *name == level)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level, expected one of {LEVEL_NAMES:?}"))
    })
}

/// Map the verbosity count to a tracing level; `None` keeps the default.
#[must_use]
pub const fn verbosity_level(count: u8) -> Option<Level> {
    match count {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .long_help(
                "Verbosity level. Repeat -v to raise it, or set TGAUTH_LOG_LEVEL to a level name or 0-5. \
                 RUST_LOG directives take precedence. Logs go to stderr.",
            )
            .env("TGAUTH_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some(Level::WARN));
        assert_eq!(verbosity_level(2), Some(Level::INFO));
        assert_eq!(verbosity_level(3), Some(Level::DEBUG));
        assert_eq!(verbosity_level(4), Some(Level::TRACE));
        assert_eq!(verbosity_level(9), Some(Level::TRACE));
    }
}
