//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::region::directory::DEFAULT_ENDPOINT;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the region list comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Where the selected region is remembered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the storage file. Defaults to the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// When false the selection only lives for the current session.
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            persist: true,
        }
    }
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_storage_path)
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Locale used for names in the region list.
    #[serde(default = "default_list_locale")]
    pub list_locale: String,
    /// Locale used in the "Selected Region" summary.
    #[serde(default = "default_summary_locale")]
    pub summary_locale: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            list_locale: default_list_locale(),
            summary_locale: default_summary_locale(),
            timestamp_format: default_timestamp_format(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `EnvFilter` directive, e.g. `info` or `regionpick=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_true() -> bool {
    true
}
fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("regionpick")
        .join("storage.json")
}
fn default_list_locale() -> String {
    "am".to_string()
}
fn default_summary_locale() -> String {
    "ru".to_string()
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_log_dir() -> String {
    "~/.local/share/regionpick/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
