//! Logging setup for the operator.
//!
//! Output format is controlled via `CWSYNC_LOG_FORMAT`:
//! - `json` - Structured JSON output (for ELK/Loki)
//! - `pretty` - Human-readable multi-line output
//! - `compact` - Compact single-line format
//!
//! The filter comes from `CWSYNC_LOG_LEVEL`, then `RUST_LOG`, then `info`.
//! Logs go to stderr so stdout stays free for command output.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for structured logging.
    Json,
    /// Human-readable pretty format.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        })
    }
}

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    log_format: LogFormat,
    log_filter: String,
    include_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: "info".to_string(),
            include_location: false,
        }
    }
}

impl TracingConfig {
    /// Create configuration from environment variables.
    ///
    /// - `CWSYNC_LOG_FORMAT`: "json", "pretty", or "compact"
    /// - `CWSYNC_LOG_LEVEL` or `RUST_LOG`: Log filter string
    /// - `CWSYNC_LOG_LOCATION`: "true" to include file and line
    pub fn from_env() -> Self {
        let log_format = env::var("CWSYNC_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        let log_filter = env::var("CWSYNC_LOG_LEVEL")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        Self {
            log_format,
            log_filter,
            include_location: env::var("CWSYNC_LOG_LOCATION")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        }
    }

    /// Set the log format.
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Set the log filter.
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Include source file and line in log lines.
    pub fn include_location(mut self, include: bool) -> Self {
        self.include_location = include;
        self
    }

    /// The configured format.
    pub fn format(&self) -> LogFormat {
        self.log_format
    }

    /// The configured filter.
    pub fn filter(&self) -> &str {
        &self.log_filter
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    let location = config.include_location;

    let installed = match config.format() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_file(location)
                    .with_line_number(location)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_file(location)
                    .with_line_number(location),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_file(location)
                    .with_line_number(location),
            )
            .try_init(),
    };
    installed.context("Failed to initialize tracing subscriber")
}
