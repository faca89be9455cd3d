//! `-v` / `SYFT_LOG_LEVEL` verbosity flag.

use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "SYFT_LOG_LEVEL";

// Position is the verbosity count.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const MAX_VERBOSITY: u8 = 5;

/// Parse `SYFT_LOG_LEVEL`: a count up to 5 or a level name.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        let level = level.trim();

        if let Ok(count) = level.parse::<u8>() {
            return if count <= MAX_VERBOSITY {
                Ok(count)
            } else {
                Err(format!("log level {count} is above {MAX_VERBOSITY}"))
            };
        }

        LEVEL_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(level))
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| {
                format!(
                    "invalid log level {level}, expected one of: {}",
                    LEVEL_NAMES.join(", ")
                )
            })
    })
}

/// Tracing level for a verbosity count; `None` keeps the subscriber default.
#[must_use]
pub const fn level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

#[must_use]
pub fn verbosity(matches: &ArgMatches) -> Option<Level> {
    level(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log level of syft-users: error, warn, info, debug, trace (default: error)")
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
