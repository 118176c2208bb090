//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local demo store.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: http://localhost:3000)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON file
//!   (default: crates/storefront/content/products.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_CATALOG_PATH: &str = "crates/storefront/content/products.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has a value that cannot be parsed.
    #[error("invalid value for {0}: {1}")]
    InvalidVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Public URL of the storefront.
    pub base_url: Url,
    /// Path to the product catalog JSON file.
    pub catalog_path: PathBuf,
    /// Sentry DSN, if error tracking is enabled.
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag.
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = get_env_or_default("STOREFRONT_HOST", DEFAULT_HOST)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;

        let port = get_env_or_default("STOREFRONT_PORT", &DEFAULT_PORT.to_string())
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let base_url = Url::parse(&get_env_or_default("STOREFRONT_BASE_URL", DEFAULT_BASE_URL))
            .map_err(|e| ConfigError::InvalidVar("STOREFRONT_BASE_URL".to_string(), e.to_string()))?;

        let catalog_path =
            PathBuf::from(get_env_or_default("STOREFRONT_CATALOG_PATH", DEFAULT_CATALOG_PATH));

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// Socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    ///
    /// Controls the `Secure` attribute on the session cookie.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.parse().expect("default host is valid"),
            port: DEFAULT_PORT,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.is_secure());
    }

    #[test]
    fn test_is_secure_for_https_base_url() {
        let config = StorefrontConfig {
            base_url: Url::parse("https://shop.stepstyle.example").unwrap(),
            ..StorefrontConfig::default()
        };
        assert!(config.is_secure());
    }
}
