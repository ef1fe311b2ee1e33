//! Logging configuration.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::{Error, Result};

/// Environment variable holding filter directives.
pub const LOG_FILTER_ENV: &str = "RESTVAULT_LOG";

const DEFAULT_FILTER: &str = "restvault=info,warn";
const VERBOSE_FILTER: &str = "restvault=debug,info";

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown log format '{other}' (expected pretty or json)"
            ))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Line format.
    pub format: LogFormat,
    /// Level filter.
    pub filter: EnvFilter,
    /// Optional log file; stderr when absent.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging configuration.
    ///
    /// Filter precedence: `RESTVAULT_LOG`, then `RUST_LOG`, then the config
    /// file, then the default. `verbose` replaces the default with a debug
    /// level but never overrides an explicit filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unknown format or a malformed
    /// filter.
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Result<Self> {
        Self::from_lookup(settings, verbose, |key| std::env::var(key).ok())
    }

    fn from_lookup(
        settings: &LoggingSettings,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let format = settings
            .format
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();

        let directives = lookup(LOG_FILTER_ENV)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|d| !d.trim().is_empty())
            .or_else(|| settings.filter.clone())
            .unwrap_or_else(|| {
                if verbose {
                    VERBOSE_FILTER.to_string()
                } else {
                    DEFAULT_FILTER.to_string()
                }
            });
        let filter = EnvFilter::try_new(&directives)
            .map_err(|e| Error::InvalidInput(format!("invalid log filter '{directives}': {e}")))?;

        Ok(Self {
            format,
            filter,
            file: settings.file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_lookup(&LoggingSettings::default(), false, |_| None).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.filter.to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
        assert!(config.file.is_none());
    }

    #[test]
    fn test_verbose_uses_debug() {
        let config = LoggingConfig::from_lookup(&LoggingSettings::default(), true, |_| None).unwrap();
        assert!(config.filter.to_string().contains("restvault=debug"));
    }

    #[test]
    fn test_env_filter_wins_over_settings() {
        let settings = LoggingSettings {
            filter: Some("restvault=warn".to_string()),
            ..LoggingSettings::default()
        };
        let config = LoggingConfig::from_lookup(&settings, true, |key| {
            (key == LOG_FILTER_ENV).then(|| "restvault=trace".to_string())
        })
        .unwrap();
        assert!(config.filter.to_string().contains("restvault=trace"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
