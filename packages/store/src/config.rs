//! # Application configuration: `kvark.toml`
//!
//! The client is configured by a small TOML file embedded at build time
//! (the workspace-level `kvark.toml`). The API base URL can be overridden
//! per build through the `KVARK_API_URL` environment variable, so staging
//! and production bundles come from the same source tree.
//!
//! ```toml
//! [api]
//! base_url = "https://api.tihlde.org/"
//!
//! [cache]
//! stale_after_secs = 60      # 0 keeps cached data until invalidated
//!
//! [snackbar]
//! duration_ms = 4000
//! ```
//!
//! Every section derives `Default`, so a missing or partial file is
//! equivalent to the defaults below.

use serde::{Deserialize, Serialize};

const EMBEDDED_CONFIG: &str = include_str!("../../../kvark.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialise configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub snackbar: SnackbarConfig,
}

/// Remote REST API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://api.tihlde.org/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Absolute URL for an endpoint path such as `"events/3/"`.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Query cache behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds after which cached data is refetched on next use.
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u32,
}

fn default_stale_after() -> u32 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: default_stale_after(),
        }
    }
}

/// Transient notification banner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnackbarConfig {
    #[serde(default = "default_snackbar_duration")]
    pub duration_ms: u32,
}

fn default_snackbar_duration() -> u32 {
    4000
}

impl Default for SnackbarConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_snackbar_duration(),
        }
    }
}

impl AppConfig {
    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder method to point the client at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The embedded configuration with the build-time URL override applied.
    /// Falls back to defaults if the embedded file does not parse.
    pub fn load() -> Self {
        let config = Self::from_toml(EMBEDDED_CONFIG).unwrap_or_else(|e| {
            tracing::error!("{e}; using default configuration");
            Self::default()
        });
        match option_env!("KVARK_API_URL") {
            Some(url) if !url.is_empty() => config.with_base_url(url),
            _ => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cache.stale_after_secs, 60);
        assert_eq!(config.snackbar.duration_ms, 4000);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml("[api]\nbase_url = \"http://localhost:8000/\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/");
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default().with_base_url("https://staging.example.org");
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml("[api\nbase_url = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_embedded_config_parses() {
        assert!(AppConfig::from_toml(EMBEDDED_CONFIG).is_ok());
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let api = ApiConfig::new("https://api.example.org/");
        assert_eq!(api.url_for("events/"), "https://api.example.org/events/");
        assert_eq!(api.url_for("/events/1/"), "https://api.example.org/events/1/");

        let api = ApiConfig::new("https://api.example.org");
        assert_eq!(api.url_for("news/"), "https://api.example.org/news/");
    }
}
