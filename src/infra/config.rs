// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::paths;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "CVSCAN_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where downloaded CVs are written. Defaults to the user's download dir.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_export_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: default_export_format(),
        }
    }
}

impl ExportConfig {
    pub fn download_dir(&self) -> PathBuf {
        self.dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::download_dir)
    }
}

fn default_export_format() -> String {
    "txt".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Write logs to a file while the TUI is running.
    #[serde(default = "default_true")]
    pub log_to_file: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_to_file: true,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        let config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.api.base_url, DEFAULT_API_URL);
        assert!(c.api.timeout().is_none());
        assert_eq!(c.export.format, "txt");
        assert!(c.export.dir.is_none());
        assert!(c.ui.log_to_file);
        assert_eq!(c.ui.log_level, "info");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.export.format, "txt");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[api]
base_url = "https://cv.example.com/api"
timeout_seconds = 30

[export]
dir = "/tmp/cvs"
format = "txt"

[ui]
log_to_file = false
log_level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://cv.example.com/api");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.export.download_dir(), PathBuf::from("/tmp/cvs"));
        assert!(!config.ui.log_to_file);
        assert_eq!(config.ui.log_level, "debug");
    }

    #[test]
    fn test_partial_api_table_keeps_default_url() {
        let config: Config = toml::from_str("[api]\ntimeout_seconds = 30\n").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://x\"\ntimeout_seconds = 0\n").unwrap();
        assert!(config.api.timeout().is_none());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.api.base_url, config.api.base_url);
        assert_eq!(deserialized.ui.log_level, config.ui.log_level);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }
}
