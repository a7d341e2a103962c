//! Logging System
//!
//! Structured logging using the `tracing` crate. The library only emits
//! events; the binary installs a subscriber once at startup through
//! [`init_logging`]. Output always goes to stderr so that command output on
//! stdout stays clean.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{HexCipherError, Result};

/// Accepted values for [`LoggingConfig::level`].
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: text or json (default: text)
    pub format: LogFormat,

    /// Enable colored output (text format only)
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Checks that `level` is one of [`LOG_LEVELS`].
    ///
    /// # Errors
    /// Returns [`HexCipherError::Config`] for an unknown level.
    pub fn validate(&self) -> Result<()> {
        if LOG_LEVELS.contains(&self.level.as_str()) {
            Ok(())
        } else {
            Err(HexCipherError::Config(format!(
                "Invalid log level: {} (must be one of {})",
                self.level,
                LOG_LEVELS.join(", ")
            )))
        }
    }
}

/// Initialize the logging system
///
/// Installs a global subscriber writing to stderr with the configured level
/// filter and format.
///
/// # Errors
/// Returns [`HexCipherError::Config`] for an invalid level and
/// [`HexCipherError::Logging`] if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config)?;
    let base_subscriber = Registry::default().with(filter);

    let installed = match config.format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.map_err(|e| HexCipherError::Logging(e.to_string()))
}

/// Build the level filter from config
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    config.validate()?;
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }
    // Keep dependency noise out of verbose runs.
    let directive = format!("warn,hexcipher={}", config.level);
    EnvFilter::try_new(&directive)
        .map_err(|e| HexCipherError::Config(format!("Invalid log directive: {}", e)))
}
