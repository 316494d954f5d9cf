//! Observability: logging setup.
//!
//! Logs go to stderr (or an append-only file) so command output on stdout
//! stays clean. Store operations also record `metrics` counters; no exporter
//! is installed here.

mod logging;

pub use logging::{LOG_ENV, LogFormat, LoggingConfig};

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initializes logging from config settings with env overrides.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file cannot be opened.
pub fn init_from_config(settings: &LoggingSettings, verbose: bool) -> Result<()> {
    init(LoggingConfig::from_settings(Some(settings), verbose))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file cannot be opened.
pub fn init(config: LoggingConfig) -> Result<()> {
    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(Mutex::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    let registry = tracing_subscriber::registry().with(config.filter);

    let installed = match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry
            .with(layer.compact().with_target(config.file.is_some()))
            .try_init(),
    };
    installed.map_err(|e| Error::OperationFailed {
        operation: "init_logging".to_string(),
        cause: e.to_string(),
    })
}

/// Opens `path` for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    let access = |p: &Path, e: std::io::Error| Error::FileAccess {
        path: p.to_path_buf(),
        cause: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| access(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| access(path, e))
}
