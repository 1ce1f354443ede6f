//! Server configuration module.
//!
//! Listen address, Pingdom access settings and the embedded engine settings, with defaults.

use anyhow::{Context, Result};
use shared::config::SyncConfig;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use validator::Validate;

/// Default Pingdom API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.pingdom.com/api/3.1";

/// Pingdom API access settings.
#[derive(Clone, Validate)]
pub struct PingdomConfig {
    /// API base URL, without trailing slash.
    #[validate(url(message = "Pingdom base URL must be a valid URL"))]
    pub base_url: String,
    /// Bearer token.
    #[validate(length(min = 1, message = "Pingdom API token is required"))]
    pub api_token: String,
    /// Per-request timeout in seconds.
    #[validate(range(min = 1, message = "Request timeout must be at least 1s"))]
    pub timeout_secs: u64,
}

impl PingdomConfig {
    /// Creates a configuration for the default API endpoint.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.into(),
            timeout_secs: 30,
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for PingdomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingdomConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Server configuration.
///
/// Built by the command line from flags and their `PINGDOM_EXPORTER_*`
/// environment fallbacks.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Pingdom API access.
    #[validate(nested)]
    pub pingdom: PingdomConfig,
    /// Synchronization engine settings, validated by [`SyncConfig::validate_config`].
    pub sync: SyncConfig,
}

impl Config {
    /// Creates a configuration with defaults and the given API token.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            pingdom: PingdomConfig::new(api_token),
            sync: SyncConfig::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing every invalid field.
    pub fn validate_config(&self) -> Result<()> {
        self.validate().context("Invalid exporter configuration")?;
        self.sync
            .validate_config()
            .context("Invalid exporter configuration")
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port cannot be parsed as a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}
