//! Structured logging configuration.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::{Error, Result};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "STAFFMAIL_LOG";

/// Filter used when nothing else is configured.
const DEFAULT_LEVEL: &str = "warn";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown log format '{other}' (expected pretty, compact, or json)"
            ))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Line format.
    pub format: LogFormat,
    /// Append to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging config from file settings and the process environment.
    ///
    /// The filter comes from `--verbose` (forces `debug`), then [`LOG_ENV`],
    /// then `RUST_LOG`, then the configured level, then `warn`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::from_settings_with(settings, verbose, |key| std::env::var(key).ok())
    }

    /// [`Self::from_settings`] with a custom environment lookup.
    #[must_use]
    pub fn from_settings_with(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let directive = if verbose {
            "debug".to_string()
        } else {
            env(LOG_ENV)
                .or_else(|| env("RUST_LOG"))
                .or_else(|| settings.and_then(|s| s.level.clone()))
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
        };

        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
            eprintln!("Warning: invalid log filter '{directive}' ({e}); using '{DEFAULT_LEVEL}'");
            EnvFilter::new(DEFAULT_LEVEL)
        });

        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(|f| {
                f.parse().unwrap_or_else(|e| {
                    eprintln!("Warning: {e}; using compact");
                    LogFormat::Compact
                })
            })
            .unwrap_or_default();

        Self {
            filter,
            format,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}
