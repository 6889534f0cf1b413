//! Logging bootstrap for monitor hosts
//!
//! The monitor itself only emits `tracing` events; hosts that do not already
//! carry a subscriber can initialize one here. Level selection honors
//! `RUST_LOG` over the configured default.

use mongobullet_protocol::Error;
use serde::{Deserialize, Serialize};
use std::env;

/// Output format for the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Single-line output
    Compact,
    /// One JSON object per event
    Json,
}

/// Subscriber configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset
    pub level: String,
    /// Event rendering format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Install a global subscriber for this configuration
    pub fn initialize(&self) -> Result<(), Error> {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let level = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&level))
            .map_err(|e| Error::logging_setup(format!("Invalid log level: {e}")))?;

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .init();
            }
        }

        Ok(())
    }
}
