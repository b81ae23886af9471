//! Configuration management for the client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default API base (can be overridden at compile time via MARKET_API_URL env var).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("MARKET_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000/api",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const ENV_LOG_LEVEL: &str = "MARKET_LOG_LEVEL";
const ENV_API_URL: &str = "MARKET_API_URL";
const ENV_REQUEST_TIMEOUT: &str = "MARKET_REQUEST_TIMEOUT_SECS";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL every API path is appended to.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Optional per-request timeout. Requests never time out when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from `config.json` under `paths`, falling back to
    /// defaults, then apply environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a variable lookup. Blank values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            match raw.parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_REQUEST_TIMEOUT),
            }
        }
    }

    /// Check that the API base parses and the timeout is usable.
    pub fn validate(&self) -> CoreResult<()> {
        self.api_url()?;
        if self.request_timeout_secs == Some(0) {
            return Err(CoreError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the API base as a parsed URL.
    pub fn api_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_base_url).map_err(CoreError::from)
    }

    /// API base without a trailing slash, ready for `format!("{base}{path}")`.
    pub fn api_base(&self) -> String {
        self.api_base_url.trim_end_matches('/').to_string()
    }

    /// Per-request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
