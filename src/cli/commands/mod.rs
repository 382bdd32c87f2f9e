pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgGroup, ColorChoice, Command,
};

pub const ARG_ENDPOINT: &str = "endpoint";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_PAYLOAD: &str = "payload";
pub const ARG_PAYLOAD_FILE: &str = "payload-file";
pub const ARG_QUERY: &str = "query";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("tgauth")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .long_about(
            "Forward a Telegram Login Widget user object to the authentication endpoint.\n\
             Prints \"User is verified\" on a 2xx response and \"Error\" otherwise.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_ENDPOINT)
                .short('e')
                .long("endpoint")
                .help("Authentication endpoint the payload is posted to")
                .default_value(crate::DEFAULT_ENDPOINT)
                .env("TGAUTH_ENDPOINT"),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds (default: none)")
                .env("TGAUTH_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_PAYLOAD)
                .short('p')
                .long("payload")
                .value_name("JSON")
                .help("Widget user object as JSON"),
        )
        .arg(
            Arg::new(ARG_PAYLOAD_FILE)
                .short('f')
                .long("payload-file")
                .value_name("PATH")
                .help("Read the widget user object from a JSON file, '-' for stdin"),
        )
        .arg(
            Arg::new(ARG_QUERY)
                .short('q')
                .long("query")
                .value_name("QUERY")
                .help("Widget redirect query string, e.g. id=123&first_name=Jo&hash=..."),
        )
        .group(
            ArgGroup::new("input")
                .args([ARG_PAYLOAD, ARG_PAYLOAD_FILE, ARG_QUERY])
                .required(true)
                .multiple(false),
        );

    logging::with_args(command)
}
