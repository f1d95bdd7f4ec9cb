//! Configuration module for chartsearch
//!
//! Manages search tunables, the catalog location and logging.
//! Configuration is stored in the user's config directory as TOML;
//! `CHARTSEARCH_*` environment variables override individual keys.

use crate::catalog::CatalogSettings;
use crate::search::{ControllerSettings, SearchScope};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides (`CHARTSEARCH_DEBOUNCE_MS=150`)
const ENV_PREFIX: &str = "CHARTSEARCH";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ChartsearchConfig {
    /// Quiet period after a keystroke before searching, in milliseconds
    pub debounce_ms: u64,

    /// Minimum query length before the service is called
    pub min_query_len: usize,

    /// Query that lists everything regardless of length
    pub wildcard: String,

    /// Close the dropdown when a search fails instead of showing "No results"
    pub close_on_error: bool,

    /// Scope selected at startup
    pub default_scope: SearchScope,

    /// Catalog file; the bundled sample is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Cap on results returned by the catalog
    pub max_results: usize,

    /// Artificial catalog latency, in milliseconds
    pub simulated_latency_ms: u64,

    /// Log file for the interactive UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for ChartsearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 3,
            wildcard: "*".to_string(),
            close_on_error: false,
            default_scope: SearchScope::All,
            catalog: None,
            max_results: 50,
            simulated_latency_ms: 0,
            log_file: None,
        }
    }
}

impl ChartsearchConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("chartsearch").join("config.toml"))
    }

    /// Default log file location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn default_log_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("chartsearch").join("chartsearch.log"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file is not an error: defaults plus environment overrides apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed, or an
    /// environment override has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created or the file
    /// cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Settings for the search controller
    #[must_use]
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            min_query_len: self.min_query_len,
            wildcard: self.wildcard.clone(),
            close_on_error: self.close_on_error,
        }
    }

    /// Settings for the catalog service
    #[must_use]
    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            wildcard: self.wildcard.clone(),
            max_results: self.max_results,
            latency: Duration::from_millis(self.simulated_latency_ms),
        }
    }

    /// Log file to use, falling back to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no log file is configured and the data
    /// directory cannot be determined.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Self::default_log_path(),
        }
    }
}
