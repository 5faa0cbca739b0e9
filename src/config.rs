//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, StoreError};

/// Default IGDB API base URL
pub const DEFAULT_IGDB_API_URL: &str = "https://api.igdb.com/v4";

/// Default Twitch OAuth token endpoint
pub const DEFAULT_TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Twitch application client id, sent to IGDB as `Client-ID`
    pub igdb_client_id: String,
    /// Twitch application client secret
    pub igdb_client_secret: SecretString,
    /// IGDB API base URL (no trailing slash)
    pub igdb_api_url: String,
    /// OAuth client-credentials endpoint
    pub twitch_token_url: String,
    /// Background token check interval in seconds (0 disables the task)
    pub token_refresh_interval: u64,
    /// Timeout in seconds for every upstream HTTP call
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `IGDB_CLIENT_ID` - Twitch client id (default: empty)
    /// - `IGDB_CLIENT_SECRET` - Twitch client secret (default: empty)
    /// - `IGDB_API_URL` - IGDB base URL (default: `https://api.igdb.com/v4`)
    /// - `TWITCH_TOKEN_URL` - OAuth endpoint (default: `https://id.twitch.tv/oauth2/token`)
    /// - `TOKEN_REFRESH_INTERVAL` - Token check frequency in seconds (default: 300)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            igdb_client_id: env::var("IGDB_CLIENT_ID").unwrap_or_default(),
            igdb_client_secret: SecretString::from(
                env::var("IGDB_CLIENT_SECRET").unwrap_or_default(),
            ),
            igdb_api_url: env::var("IGDB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.igdb_api_url),
            twitch_token_url: env::var("TWITCH_TOKEN_URL").unwrap_or(defaults.twitch_token_url),
            token_refresh_interval: parse_var("TOKEN_REFRESH_INTERVAL")
                .unwrap_or(defaults.token_refresh_interval),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Checks that the IGDB credentials are present.
    pub fn validate(&self) -> Result<()> {
        if self.igdb_client_id.trim().is_empty() {
            return Err(StoreError::Config("IGDB_CLIENT_ID is not set".to_string()));
        }
        if self.igdb_client_secret.expose_secret().trim().is_empty() {
            return Err(StoreError::Config(
                "IGDB_CLIENT_SECRET is not set".to_string(),
            ));
        }
        Ok(())
    }

    /// Upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            igdb_client_id: String::new(),
            igdb_client_secret: SecretString::from(String::new()),
            igdb_api_url: DEFAULT_IGDB_API_URL.to_string(),
            twitch_token_url: DEFAULT_TWITCH_TOKEN_URL.to_string(),
            token_refresh_interval: 300,
            upstream_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.igdb_api_url, DEFAULT_IGDB_API_URL);
        assert_eq!(config.twitch_token_url, DEFAULT_TWITCH_TOKEN_URL);
        assert_eq!(config.token_refresh_interval, 300);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validate_requires_credentials() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        config.igdb_client_id = "client".to_string();
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        config.igdb_client_secret = SecretString::from("secret".to_string());
        assert!(config.validate().is_ok());
    }
}
