//! CLI command implementations for hexclaim.

pub(crate) mod console;
pub(crate) mod tiles;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use hexclaim::TileType;
use std::error::Error;
use std::fmt;
use tracing_subscriber::EnvFilter;

/// Output format for the `tiles` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Tile type filter for the `tiles` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TileFilter {
    /// Ordinary tiles.
    Blank,
    /// Banner tiles.
    Banner,
    /// Relic tiles.
    Relic,
}

impl From<TileFilter> for TileType {
    fn from(filter: TileFilter) -> Self {
        match filter {
            TileFilter::Blank => Self::Blank,
            TileFilter::Banner => Self::Banner,
            TileFilter::Relic => Self::Relic,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<hexclaim::ConfigError> for CliError {
    fn from(e: hexclaim::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<hexclaim::LayoutError> for CliError {
    fn from(e: hexclaim::LayoutError) -> Self {
        Self::new(format!("invalid map layout: {e}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects `debug`, `-vv` `trace`.
pub(crate) fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "hexclaim=debug",
        _ => "hexclaim=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
