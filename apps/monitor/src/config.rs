//! Application configuration.

use serde::{Deserialize, Serialize};
use stake_alerts::AlertConfig;
use stake_engine::MonitorConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "STAKE_MONITOR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "stake-monitor.json";

/// Environment overrides, applied after the config file.
pub const WEBHOOK_URL_VAR: &str = "STAKE_MONITOR_WEBHOOK_URL";
pub const STATE_FILE_VAR: &str = "STAKE_MONITOR_STATE_FILE";
pub const DAEMON_PATH_VAR: &str = "STAKE_MONITOR_DAEMON_PATH";
pub const LOG_VAR: &str = "STAKE_MONITOR_LOG";

/// File name of the state file under the daemon path when none is configured.
const DEFAULT_STATE_FILE: &str = "qtum_monitor.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No webhook URL configured (set alerts.webhook_url or STAKE_MONITOR_WEBHOOK_URL)")]
    MissingWebhook,
    #[error("Temperature warning threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Decision options.
    pub monitor: MonitorConfig,
    /// Notification destination and labelling.
    pub alerts: AlertConfig,
    /// Daemon install prefix; the CLI is `<daemon_path>/bin/qtum-cli`.
    pub daemon_path: PathBuf,
    /// Snapshot location. Defaults to `<daemon_path>/qtum_monitor.log`.
    pub state_file: Option<PathBuf>,
    /// Temperature command line.
    pub temperature_command: String,
    /// Log filter, e.g. `info` or `stake_engine=debug`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            alerts: AlertConfig::default(),
            daemon_path: PathBuf::from("/usr/local/"),
            state_file: None,
            temperature_command: "/opt/vc/bin/vcgencmd measure_temp".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `STAKE_MONITOR_CONFIG`, then apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(WEBHOOK_URL_VAR) {
            self.alerts.webhook_url = url;
        }
        if let Some(path) = get(STATE_FILE_VAR) {
            self.state_file = Some(PathBuf::from(path));
        }
        if let Some(path) = get(DAEMON_PATH_VAR) {
            self.daemon_path = PathBuf::from(path);
        }
        if let Some(level) = get(LOG_VAR) {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alerts.has_destination() {
            return Err(ConfigError::MissingWebhook);
        }
        let threshold = self.monitor.temperature_warning_threshold;
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| self.daemon_path.join(DEFAULT_STATE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(!config.monitor.always_notify);
        assert!(config.monitor.daily_status_update);
        assert_eq!(config.monitor.temperature_warning_threshold, 80.0);
        assert_eq!(config.state_path(), PathBuf::from("/usr/local/qtum_monitor.log"));
        assert!(matches!(config.validate(), Err(ConfigError::MissingWebhook)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stake-monitor.json");
        std::fs::write(
            &path,
            r#"{
                "monitor": { "always_notify": true, "monitor_temperature": false },
                "alerts": { "webhook_url": "https://hooks.example.com/T0/B0/x", "coin": "QTUM" },
                "daemon_path": "/opt/qtum"
            }"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert!(config.monitor.always_notify);
        assert!(!config.monitor.monitor_temperature);
        assert!(config.monitor.daily_status_update);
        assert_eq!(config.state_path(), PathBuf::from("/opt/qtum/qtum_monitor.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stake-monitor.json");
        std::fs::write(&path, "{ \"monitor\": ").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (WEBHOOK_URL_VAR, "https://hooks.example.com/T1/B1/y"),
            (STATE_FILE_VAR, "/var/lib/stake-monitor/state.json"),
            (DAEMON_PATH_VAR, ""),
            (LOG_VAR, "stake_engine=debug"),
        ]);

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.alerts.webhook_url, "https://hooks.example.com/T1/B1/y");
        assert_eq!(
            config.state_path(),
            PathBuf::from("/var/lib/stake-monitor/state.json")
        );
        // Empty override leaves the default in place
        assert_eq!(config.daemon_path, PathBuf::from("/usr/local/"));
        assert_eq!(config.log_level, "stake_engine=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        let mut config = AppConfig::default();
        config.alerts.webhook_url = "https://hooks.example.com/x".into();
        config.monitor.temperature_warning_threshold = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
