//! Structured logging setup
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and a
//! pretty or JSON formatter. Output goes to stderr so that commands
//! printing to stdout (such as `inspect`) stay machine readable.
//!
//! Environment:
//!
//! * `TSGEN_LOG_LEVEL` - trace/debug/info/warn/error, default `info`
//! * `TSGEN_LOG_FORMAT` - `pretty` (default) or `json`
//! * `RUST_LOG` - when set, takes precedence over `TSGEN_LOG_LEVEL`

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: pretty for terminals, JSON for build pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Include file:line of the log call
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Read the configuration from the environment, with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("TSGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("TSGEN_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
            include_location: env::var("TSGEN_LOG_INCLUDE_LOCATION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Parsed level; unknown names fall back to `info`
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Install the global subscriber described by `config`
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
