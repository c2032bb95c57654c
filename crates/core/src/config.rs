//! Configuration structures for the agent tools.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted by [`MarketstackConfig::from_env`].
pub const API_KEY_ENV: &str = "MARKETSTACK_API_KEY";

/// Main configuration for the tool set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alert intake configuration.
    pub alerts: AlertConfig,
    /// Market data provider configuration.
    pub marketstack: MarketstackConfig,
}

impl Config {
    /// Parse a configuration mapping from JSON. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration mapping from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
        Self::from_json_str(&raw)
    }
}

/// Alert intake configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Alert document to publish.
    pub data_file: PathBuf,
    /// Document holding the `resolutions` list.
    pub resolutions_file: PathBuf,
    /// Topic named in the publish message.
    pub topic: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/amber_alert.json"),
            resolutions_file: PathBuf::from("data/resolutions.json"),
            topic: "alert/received".to_string(),
        }
    }
}

impl AlertConfig {
    /// Parse an alert configuration mapping from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Marketstack EOD provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketstackConfig {
    /// Fallback API key used when a request carries none.
    pub api_key: Option<String>,
    /// API root; the EOD endpoint is `<base_url>/eod`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MarketstackConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.marketstack.com/v2".to_string(),
            timeout_secs: 30,
        }
    }
}

impl MarketstackConfig {
    /// Defaults, with the fallback key taken from `MARKETSTACK_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Set the fallback API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Full URL of the EOD endpoint.
    pub fn eod_url(&self) -> String {
        format!("{}/eod", self.base_url.trim_end_matches('/'))
    }

    /// Pick the key for a request: an explicit non-empty key wins, then the
    /// configured fallback.
    pub fn resolve_api_key<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.as_deref().filter(|k| !k.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.alerts.data_file, PathBuf::from("data/amber_alert.json"));
        assert_eq!(config.alerts.resolutions_file, PathBuf::from("data/resolutions.json"));
        assert_eq!(config.alerts.topic, "alert/received");
        assert_eq!(config.marketstack.timeout_secs, 30);
        assert!(config.marketstack.api_key.is_none());
    }

    #[test]
    fn test_partial_mapping_keeps_defaults() {
        let config = Config::from_json_str(r#"{"alerts": {"data_file": "fixtures/a.json"}}"#).unwrap();
        assert_eq!(config.alerts.data_file, PathBuf::from("fixtures/a.json"));
        assert_eq!(config.alerts.resolutions_file, PathBuf::from("data/resolutions.json"));
        assert_eq!(config.marketstack, MarketstackConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"marketstack": {{"api_key": "k-123", "timeout_secs": 5}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.marketstack.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.marketstack.timeout_secs, 5);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_eod_url_trims_slash() {
        let config = MarketstackConfig {
            base_url: "http://localhost:9000/v2/".to_string(),
            ..MarketstackConfig::default()
        };
        assert_eq!(config.eod_url(), "http://localhost:9000/v2/eod");
    }

    #[test]
    fn test_resolve_api_key() {
        let config = MarketstackConfig::default().with_api_key("fallback");
        assert_eq!(config.resolve_api_key(Some("explicit")), Some("explicit"));
        assert_eq!(config.resolve_api_key(Some("")), Some("fallback"));
        assert_eq!(config.resolve_api_key(None), Some("fallback"));

        let empty = MarketstackConfig::default();
        assert_eq!(empty.resolve_api_key(None), None);
        assert_eq!(empty.with_api_key("").resolve_api_key(Some("")), None);
    }
}
