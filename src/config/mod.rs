//! Configuration management.
//!
//! Settings come from an optional TOML file merged over defaults, then from
//! environment overrides. Command-line flags are applied last by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STAFFMAIL_CONFIG_PATH";

/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "STAFFMAIL_DATABASE";

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "staffmail.db";

/// Main configuration for staffmail.
#[derive(Debug, Clone)]
pub struct StaffmailConfig {
    /// Path to the `SQLite` data file.
    pub database_path: PathBuf,
    /// Logging settings, resolved into a filter and format at startup.
    pub logging: LoggingSettings,
    /// Import behavior.
    pub import: ImportSettings,
    /// The file these settings were read from, if any.
    pub source: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `staffmail=debug`.
    pub level: Option<String>,
    /// Output format: `pretty`, `compact`, or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Import behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSettings {
    /// Skip rows whose email already exists.
    pub skip_duplicates: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub database_path: Option<String>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Import section.
    pub import: Option<ConfigFileImport>,
}

/// Import section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileImport {
    /// Skip duplicate emails.
    pub skip_duplicates: Option<bool>,
}

impl Default for StaffmailConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            logging: LoggingSettings::default(),
            import: ImportSettings::default(),
            source: None,
        }
    }
}

impl StaffmailConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let mut config = Self::from_config_file(file);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/staffmail/` on macOS)
    /// 2. XDG config dir (`~/.config/staffmail/` for Unix compatibility)
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("staffmail").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("staffmail")
                .join("config.toml"),
        ];

        for candidate in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "Ignoring unreadable config file"),
            }
        }

        Self::default()
    }

    /// Resolves the configuration for a run.
    ///
    /// `explicit` (the `--config` flag) wins, then [`CONFIG_PATH_ENV`], then
    /// the default locations. Environment overrides are applied afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// [`Self::resolve`] with a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn resolve_with(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).filter(|s| !s.trim().is_empty()).map(PathBuf::from));

        let config = match named {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides(env))
    }

    /// Applies environment overrides using `env` as the lookup.
    #[must_use]
    pub fn with_env_overrides(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = env(DATABASE_ENV).filter(|s| !s.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        self
    }

    /// Converts a `ConfigFile` to `StaffmailConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(database_path) = file.database_path {
            config.database_path = PathBuf::from(database_path);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(skip) = file.import.and_then(|i| i.skip_duplicates) {
            config.import.skip_duplicates = skip;
        }

        config
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }
}
