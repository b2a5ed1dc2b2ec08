use crate::error::{Result, TrackerError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_BASE_URL: &str = "https://app.asana.com/api/1.0";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SECRET_SERVICE: &str = "asana-progress";
/// Largest page the Asana API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Overrides the data directory (config and persisted token).
pub const HOME_ENV: &str = "ASANA_PROGRESS_HOME";
/// Overrides `api_base_url`.
pub const API_BASE_ENV: &str = "ASANA_API_BASE";

/// Configuration for the tracker, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Root of the Asana REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Records requested per page (1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds; 0 keeps the transport default
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Service namespace used for the persisted token
    #[serde(default = "default_secret_service")]
    pub secret_service: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_secret_service() -> String {
    DEFAULT_SECRET_SERVICE.to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            secret_service: default_secret_service(),
        }
    }
}

impl TrackerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TrackerConfig = serde_json::from_str(&content)?;
        config.validated()
    }

    /// Applies environment overrides on top of file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_base(std::env::var(API_BASE_ENV).ok())
    }

    fn with_api_base(mut self, base: Option<String>) -> Self {
        if let Some(base) = base.filter(|b| !b.trim().is_empty()) {
            self.api_base_url = base.trim().to_string();
        }
        self
    }

    /// Request timeout, `None` when the transport default should be kept.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    fn validated(self) -> Result<Self> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(TrackerError::Config(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(TrackerError::Config("api_base_url cannot be empty".into()));
        }
        Ok(self)
    }
}

/// Resolves the data directory: `$ASANA_PROGRESS_HOME`, else the platform config dir.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "asana-progress", "asana-progress")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TrackerError::Config("Could not determine config dir".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.api_base_url, "https://app.asana.com/api/1.0");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.secret_service, "asana-progress");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_load_written_config() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig {
            page_size: 25,
            timeout_secs: 5,
            ..TrackerConfig::default()
        };
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();

        let loaded = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"page_size": 10}"#).unwrap();

        let loaded = TrackerConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.page_size, 10);
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_out_of_range_page_size_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"page_size": 500}"#).unwrap();

        let err = TrackerConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();

        assert!(matches!(
            TrackerConfig::load(dir.path()),
            Err(TrackerError::Serialization(_))
        ));
    }

    #[test]
    fn test_api_base_override() {
        let config = TrackerConfig::default().with_api_base(Some("http://127.0.0.1:9999".into()));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");

        let config = TrackerConfig::default().with_api_base(Some("   ".into()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_zero_timeout_keeps_transport_default() {
        let config = TrackerConfig {
            timeout_secs: 0,
            ..TrackerConfig::default()
        };
        assert!(config.timeout().is_none());
        assert_eq!(
            TrackerConfig::default().timeout(),
            Some(Duration::from_secs(30))
        );
    }
}
