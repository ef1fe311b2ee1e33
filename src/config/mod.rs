//! Configuration management.
//!
//! Configuration is read from a TOML file and then adjusted by environment
//! variables. Every field has a default, so an absent file is not an error.
//!
//! ```toml
//! data_dir = "/var/lib/restvault"
//!
//! [store]
//! backend = "sqlite"
//! sqlite_path = "/var/lib/restvault/vault.db"
//!
//! [import]
//! retry_conflicts = true
//! dry_run = false
//!
//! [logging]
//! format = "json"
//! filter = "restvault=debug"
//! file = "/var/log/restvault.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::StoreBackend;
use crate::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "RESTVAULT_CONFIG_PATH";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RESTVAULT_DATA_DIR";
/// Environment variable overriding the store backend.
pub const STORE_ENV: &str = "RESTVAULT_STORE";
/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "RESTVAULT_LOG_FORMAT";

const APP_NAME: &str = "restvault";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_DB_NAME: &str = "restvault.db";

/// Main configuration for restvault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestvaultConfig {
    /// Directory holding the database and other state.
    pub data_dir: PathBuf,
    /// Store settings.
    pub store: StoreSettings,
    /// Import defaults.
    pub import: ImportSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Store section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSettings {
    /// Backend to open.
    pub backend: StoreBackend,
    /// Database file; defaults to `restvault.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqlite_path: Option<PathBuf>,
}

/// Import section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSettings {
    /// Retry a write once after a revision conflict.
    pub retry_conflicts: bool,
    /// Validate and count without writing.
    pub dry_run: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            retry_conflicts: true,
            dry_run: false,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `EnvFilter` directives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Write logs to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Store section.
    pub store: Option<ConfigFileStore>,
    /// Import section.
    pub import: Option<ConfigFileImport>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Store section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileStore {
    /// Backend name.
    pub backend: Option<String>,
    /// Database path.
    pub sqlite_path: Option<String>,
}

/// Import section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileImport {
    /// Retry on revision conflict.
    pub retry_conflicts: Option<bool>,
    /// Dry run by default.
    pub dry_run: Option<bool>,
}

impl Default for RestvaultConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreSettings::default(),
            import: ImportSettings::default(),
            logging: LoggingSettings::default(),
            config_path: None,
        }
    }
}

impl RestvaultConfig {
    /// Creates a configuration with default values.
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
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;
        Self::from_config_file(file)
    }

    /// Loads configuration from the platform config directory.
    ///
    /// Returns the default configuration when no file exists there. A file
    /// that exists but fails to parse is logged and ignored.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                Self::default()
            },
        }
    }

    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(store) = file.store {
            if let Some(backend) = store.backend {
                config.store.backend = backend.parse()?;
            }
            config.store.sqlite_path = store.sqlite_path.map(PathBuf::from);
        }
        if let Some(import) = file.import {
            if let Some(v) = import.retry_conflicts {
                config.import.retry_conflicts = v;
            }
            if let Some(v) = import.dry_run {
                config.import.dry_run = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }

    /// Applies `RESTVAULT_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an override has an invalid value.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an override has an invalid value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(STORE_ENV) {
            self.store.backend = backend.parse()?;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            self.logging.format = Some(format);
        }
        Ok(self)
    }

    /// Returns the `SQLite` database path.
    #[must_use]
    pub fn sqlite_path(&self) -> PathBuf {
        self.store
            .sqlite_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_DB_NAME))
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the store backend.
    #[must_use]
    pub const fn with_store_backend(mut self, backend: StoreBackend) -> Self {
        self.store.backend = backend;
        self
    }

    /// Renders the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::OperationFailed {
            operation: "serialize_config".to_string(),
            cause: e.to_string(),
        })
    }
}

/// Returns the platform config file location.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME).map_or_else(
        || PathBuf::from(".restvault"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}
