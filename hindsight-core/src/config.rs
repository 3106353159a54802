//! Client configuration — where the evaluation service lives.
//!
//! Stored as a small TOML file. The `HINDSIGHT_BASE_URL` environment
//! variable overrides whatever the file says, which keeps ad-hoc testing
//! against a local server painless.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the backtest API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Load from a TOML file. Returns defaults if the file is missing or
    /// corrupt — a dashboard that refuses to start over a bad config file
    /// helps nobody.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Apply the environment override, if set and non-empty.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var("HINDSIGHT_BASE_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_returns_defaults() {
        let config = ApiConfig::from_file(Path::new("/nonexistent/hindsight.toml"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("hindsight_config_corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        let config = ApiConfig::from_file(&path);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = std::env::temp_dir().join("hindsight_config_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, r#"base_url = "http://10.0.0.5:9000""#).unwrap();

        let config = ApiConfig::from_file(&path);
        assert_eq!(config.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
