//! Application configuration
//!
//! Read from `config.toml` in the platform config directory. A missing file
//! or missing keys fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use hackos_net::{MockLatency, DEFAULT_REQUEST_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Upper bound for `default_duration_hours`, one year
pub const MAX_DURATION_HOURS: i64 = 24 * 365;

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "hackos", "hackathon-os").ok_or(AppError::NoProjectDirs("home"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub mock: MockConfig,
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Latencies of the simulated team service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub create_latency_ms: u64,
    pub slow_create_latency_ms: u64,
    pub join_latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            create_latency_ms: 1200,
            slow_create_latency_ms: 4000,
            join_latency_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Timezone given to members who join by code
    pub default_timezone: String,
    /// Hackathon length assumed when joining by code, clamped to
    /// `1..=MAX_DURATION_HOURS`
    pub default_duration_hours: i64,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_timezone: "UTC".to_string(),
            default_duration_hours: 36,
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        let dirs = project_dirs()?;
        Self::load_from(&dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.request_timeout_secs)
    }

    pub fn mock_latency(&self) -> MockLatency {
        MockLatency {
            create: Duration::from_millis(self.mock.create_latency_ms),
            slow_create: Duration::from_millis(self.mock.slow_create_latency_ms),
            join: Duration::from_millis(self.mock.join_latency_ms),
        }
    }

    pub fn default_duration(&self) -> chrono::Duration {
        let hours = self.workspace.default_duration_hours;
        let clamped = hours.clamp(1, MAX_DURATION_HOURS);
        if clamped != hours {
            warn!(hours, clamped, "default_duration_hours out of range");
        }
        chrono::Duration::hours(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.mock_latency(), MockLatency::default());
        assert_eq!(config.default_duration(), chrono::Duration::hours(36));
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [network]
            request_timeout_secs = 3

            [workspace]
            default_timezone = "Europe/Berlin"
            data_dir = "/tmp/hackos"
            "#,
        )
        .unwrap();

        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.workspace.default_timezone, "Europe/Berlin");
        assert_eq!(config.workspace.default_duration_hours, 36);
        assert_eq!(config.workspace.data_dir, Some(PathBuf::from("/tmp/hackos")));
        assert_eq!(config.mock, MockConfig::default());
    }

    #[test]
    fn test_default_duration_is_clamped() {
        let huge = AppConfig::from_toml_str(
            "[workspace]\ndefault_duration_hours = 9223372036854775807",
        )
        .unwrap();
        assert_eq!(
            huge.default_duration(),
            chrono::Duration::hours(MAX_DURATION_HOURS)
        );

        let negative =
            AppConfig::from_toml_str("[workspace]\ndefault_duration_hours = -5").unwrap();
        assert_eq!(negative.default_duration(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(AppConfig::from_toml_str("[network]\nrequest_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[mock]\njoin_latency_ms = 5\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.mock_latency().join, Duration::from_millis(5));
    }
}
