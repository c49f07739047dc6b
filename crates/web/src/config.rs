//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BILLED_HOST` - Bind address (default: 127.0.0.1)
//! - `BILLED_PORT` - Listen port (default: 8080)
//! - `BILLED_API_URL` - Base URL of the bills API; the in-memory mock store
//!   is used when unset
//! - `BILLED_API_TOKEN` - Bearer token sent to the bills API
//! - `BILLED_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Remote bills API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:5678`
    pub base_url: String,
    /// Bearer token, if the API requires one
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote store (`None` runs against the mock store)
    pub api: Option<ApiConfig>,
    /// Emit logs as JSON
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl Default for WebConfig {
    /// Local mock-store configuration.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            api: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var_or("BILLED_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BILLED_HOST".to_string(), e.to_string()))?;
        let port = var_or("BILLED_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BILLED_PORT".to_string(), e.to_string()))?;

        let api = match lookup("BILLED_API_URL") {
            Some(base_url) => {
                url::Url::parse(&base_url).map_err(|e| {
                    ConfigError::InvalidEnvVar("BILLED_API_URL".to_string(), e.to_string())
                })?;
                Some(ApiConfig {
                    base_url,
                    token: lookup("BILLED_API_TOKEN").map(SecretString::from),
                })
            }
            None => None,
        };

        let sentry_sample_rate = match lookup("SENTRY_SAMPLE_RATE") {
            Some(raw) => raw
                .parse::<f32>()
                .ok()
                .filter(|rate| (0.0..=1.0).contains(rate))
                .ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "SENTRY_SAMPLE_RATE".to_string(),
                        format!("{raw:?} is not a rate between 0.0 and 1.0"),
                    )
                })?,
            None => 1.0,
        };

        Ok(Self {
            host,
            port,
            api,
            log_json: lookup("BILLED_LOG_JSON").is_some(),
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
