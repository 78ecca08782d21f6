//! Diagnostic logging to disk.
//!
//! The terminal is in the alternate screen while the app runs, so `tracing`
//! output goes to a daily file `regionpick_<date>.log` in the configured log
//! directory (default: `~/.local/share/regionpick/logs/`).

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Expand a leading `~` to the home directory.
pub fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if dir == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(dir)
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("regionpick_{}.log", date))
}

/// Install the global subscriber. Returns the file being written, or `None`
/// when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let path = log_file_path(&log_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/log/rp"), PathBuf::from("/var/log/rp"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/logs"), home.join("logs"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn test_log_file_name_is_dated() {
        let path = log_file_path(Path::new("/tmp"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("regionpick_"));
        assert!(name.ends_with(".log"));
        // regionpick_YYYY-MM-DD.log
        assert_eq!(name.len(), "regionpick_".len() + 10 + ".log".len());
    }

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let config = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert_eq!(init(&config).unwrap(), None);
    }
}
