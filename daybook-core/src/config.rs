//! Global daybook configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};

static DEFAULT_EVENTS_FILE: &str = "~/daybook/events.json";
const DEFAULT_SCAN_INTERVAL_SECS: u64 = 30;
const DEFAULT_DISPLAY_TIMEOUT_SECS: u64 = 10;

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn default_scan_interval_secs() -> u64 {
    DEFAULT_SCAN_INTERVAL_SECS
}

fn default_display_timeout_secs() -> u64 {
    DEFAULT_DISPLAY_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Global configuration at ~/.config/daybook/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DaybookConfig {
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    /// Seconds between reminder scans
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Seconds an alert stays on screen before it is dismissed
    #[serde(default = "default_display_timeout_secs")]
    pub display_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            events_file: default_events_file(),
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
            display_timeout_secs: DEFAULT_DISPLAY_TIMEOUT_SECS,
            log_level: default_log_level(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/daybook/config.toml, writing a commented default first if absent.
    pub fn load() -> DaybookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// Events file with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs.max(1))
    }

    pub fn display_timeout(&self) -> Duration {
        Duration::from_secs(self.display_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where the organizer keeps its events:
# events_file = \"{}\"

# Seconds between reminder checks:
# scan_interval_secs = {}

# Seconds a reminder stays on screen:
# display_timeout_secs = {}

# Log filter when RUST_LOG is unset:
# log_level = \"info\"
",
            DEFAULT_EVENTS_FILE, DEFAULT_SCAN_INTERVAL_SECS, DEFAULT_DISPLAY_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commented_default_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daybook").join("config.toml");

        DaybookConfig::create_default_config(&path).unwrap();
        let config = DaybookConfig::load_from(&path).unwrap();

        assert_eq!(config, DaybookConfig::default());
        assert_eq!(config.scan_interval(), Duration::from_secs(30));
        assert_eq!(config.display_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "events_file = \"/tmp/events.json\"\nscan_interval_secs = 5\n",
        )
        .unwrap();

        let config = DaybookConfig::load_from(&path).unwrap();

        assert_eq!(config.events_path(), PathBuf::from("/tmp/events.json"));
        assert_eq!(config.scan_interval(), Duration::from_secs(5));
        assert_eq!(config.display_timeout_secs, 10);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = DaybookConfig {
            scan_interval_secs: 0,
            ..DaybookConfig::default()
        };
        assert_eq!(config.scan_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_events_path_expands_tilde() {
        let config = DaybookConfig::default();
        assert!(!config.events_path().to_string_lossy().starts_with('~'));
    }
}
