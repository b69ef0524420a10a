//! Configuration
//!
//! Every setting has a default, so running with no arguments behaves like
//! the plain console program: bookings go to `bookings.txt` in the working
//! directory and only warnings are logged.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::store::DEFAULT_BOOKINGS_FILE;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Flight booking console configuration
#[derive(Debug, Parser)]
#[command(name = "flightdesk", about = "Temmy flight booking console", long_about = None)]
pub struct Config {
    /// File that bookings are appended to and listed from
    #[arg(short, long, env = "BOOKINGS_FILE", default_value = DEFAULT_BOOKINGS_FILE)]
    pub bookings_file: PathBuf,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the environment and command line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
