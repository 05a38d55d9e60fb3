//! Client configuration
//!
//! Settings are read from a YAML file and can be overridden from the
//! environment:
//!
//! ```yaml
//! base_url: https://api.example.com/v2
//! timeout_secs: 30
//! user_agent: reporting-job/1.0
//! headers:
//!   Authorization: Bearer <token>
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{default_user_agent, HttpClientConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "CALL_LOGS_BASE_URL";

/// Environment variable overriding `timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "CALL_LOGS_TIMEOUT_SECS";

/// Client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
        }
    }

    /// Parse from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("Loading client config from {}", path.display());
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| Error::InvalidConfigValue {
                field: ENV_TIMEOUT_SECS.to_string(),
                message: format!("expected whole seconds, got '{raw}'"),
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check the values make a usable client
    pub fn validate(&self) -> Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidConfigValue {
                field: "base_url".to_string(),
                message: format!("must be an http(s) URL, got '{base_url}'"),
            });
        }

        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfigValue {
                field: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Convert into the HTTP client configuration
    pub fn to_http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.trim())
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent);

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}
