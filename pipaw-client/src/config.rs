//! Client configuration.

use crate::device::{UserDevice, devices};
use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for [`crate::CachedClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether single-record lookups are memoized at all.
    pub enabled: bool,
    /// How long a cached response stays fresh (in seconds).
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
        }
    }
}

/// Configuration shared by a client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the private API (e.g. `https://i.instagram.com/api/v1/`).
    pub api_base_url: String,
    /// Device the session presents itself as.
    #[serde(default = "default_device")]
    pub device: UserDevice,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_device() -> UserDevice {
    devices()[0].clone()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://i.instagram.com/api/v1/".to_string(),
            device: default_device(),
            cache: CacheConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// User-agent header value for the configured device.
    pub fn user_agent(&self) -> String {
        self.device.user_agent()
    }

    /// Checks the settings a transport cannot work without.
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ClientError::Config(format!(
                "api_base_url must be an http(s) URL, got `{}`",
                self.api_base_url
            )));
        }
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(ClientError::Config(
                "cache.ttl_secs must be positive when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
