//! Client configuration loading.
//!
//! The configuration lives in `~/.config/feedfusion/config.toml`; the API
//! base URL can additionally be overridden through the `FEEDFUSION_API_URL`
//! environment variable.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::paths::FeedPaths;
use crate::storage::AtomicTomlFile;

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "FEEDFUSION_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the FeedFusion REST API, without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout for API calls.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Applies an environment override to the API base URL, if set.
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url;
        }
    }
}

/// Configuration service that loads and caches the client configuration.
///
/// The configuration is loaded lazily on first access; a missing or broken
/// file falls back to defaults rather than failing startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the client configuration, loading from file if not cached.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let mut loaded = Self::load_config().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default configuration");
            ClientConfig::default()
        });
        loaded.apply_env_override(std::env::var(API_URL_ENV).ok());

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config() -> Result<ClientConfig, String> {
        let path = FeedPaths::config_file().map_err(|e| e.to_string())?;
        let file = AtomicTomlFile::<ClientConfig>::new(path);
        Ok(file
            .load()
            .map_err(|e| format!("Failed to load config: {e}"))?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = ClientConfig::default();
        config.apply_env_override(Some("https://api.example.com".to_string()));
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let mut config = ClientConfig::default();
        config.apply_env_override(Some("  ".to_string()));
        assert_eq!(config.api_base_url, "http://localhost:8080/api");

        config.apply_env_override(None);
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let config: ClientConfig = toml::from_str(r#"api_base_url = "http://feed.local/api""#).unwrap();
        assert_eq!(config.api_base_url, "http://feed.local/api");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
