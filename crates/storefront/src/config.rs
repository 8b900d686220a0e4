//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_BATCH_SIZE` - Products per grid batch, first page and "load more" alike (default: 6)
//! - `STOREFRONT_SESSION_IDLE_SECS` - Seconds before an idle visitor session is dropped (default: 1800)
//! - `STOREFRONT_MAX_SESSIONS` - Upper bound on live visitor sessions (default: 10000)
//! - `CATALOG_API_URL` - Catalog service base URL (default: <https://openapi.programming-hero.com/api>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use greenleaf_core::DEFAULT_BATCH_SIZE;
use thiserror::Error;
use url::Url;

/// Catalog service used when `CATALOG_API_URL` is unset.
pub const DEFAULT_CATALOG_API_URL: &str = "https://openapi.programming-hero.com/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog service configuration
    pub catalog: CatalogConfig,
    /// Visitor session configuration
    pub sessions: SessionConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; query paths are appended to it.
    pub base_url: Url,
}

/// Visitor session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Products revealed per batch.
    pub batch_size: NonZeroUsize,
    /// Idle time after which a visitor's cart and grid are forgotten.
    pub idle_timeout: Duration,
    /// Maximum number of visitor sessions held in memory.
    pub max_sessions: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        let catalog = CatalogConfig::from_env()?;
        let sessions = SessionConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            sessions,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL);
        Ok(Self {
            base_url: parse_catalog_url(&raw)?,
        })
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let batch_size = parse_env_or_default::<NonZeroUsize>(
            "STOREFRONT_BATCH_SIZE",
            &defaults.batch_size.to_string(),
        )?;
        let idle_secs = parse_env_or_default::<u64>(
            "STOREFRONT_SESSION_IDLE_SECS",
            &defaults.idle_timeout.as_secs().to_string(),
        )?;
        let max_sessions = parse_env_or_default::<u64>(
            "STOREFRONT_MAX_SESSIONS",
            &defaults.max_sessions.to_string(),
        )?;

        Ok(Self {
            batch_size,
            idle_timeout: Duration::from_secs(idle_secs),
            max_sessions,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the catalog base URL, normalizing it to end with a slash so that
/// relative query paths join under it rather than replacing its last segment.
fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "CATALOG_API_URL".to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog: CatalogConfig {
                base_url: parse_catalog_url(DEFAULT_CATALOG_API_URL).unwrap(),
            },
            sessions: SessionConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = config();
        assert!(!config.is_secure());
        config.base_url = "https://plants.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_catalog_url_gets_trailing_slash() {
        let url = parse_catalog_url("https://openapi.programming-hero.com/api").unwrap();
        assert_eq!(url.as_str(), "https://openapi.programming-hero.com/api/");
        assert_eq!(
            url.join("plants").unwrap().as_str(),
            "https://openapi.programming-hero.com/api/plants"
        );
    }

    #[test]
    fn test_catalog_url_rejects_garbage() {
        let err = parse_catalog_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CATALOG_API_URL"));
        assert!(parse_catalog_url("mailto:plants@example.com").is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = parse_value::<NonZeroUsize>("STOREFRONT_BATCH_SIZE", "0").unwrap_err();
        assert!(err.to_string().starts_with("Invalid environment variable STOREFRONT_BATCH_SIZE"));
        assert_eq!(
            parse_value::<NonZeroUsize>("STOREFRONT_BATCH_SIZE", " 9 ").unwrap().get(),
            9
        );
    }

    #[test]
    fn test_session_defaults() {
        let sessions = SessionConfig::default();
        assert_eq!(sessions.batch_size.get(), 6);
        assert_eq!(sessions.idle_timeout, Duration::from_secs(1800));
    }
}
