//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CONSTRUCTO_API_URL` - Base URL of the Constructo backend
//!   (e.g., `https://api.constructo.example`); the `/api` prefix is added by
//!   the client
//!
//! ## Optional
//! - `CONSTRUCTO_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `CONSTRUCTO_SESSION_TOKEN` - Bearer token from a previous login; the
//!   client holds it in memory only

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API URL {0}: {1}")]
    InvalidApiUrl(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Session token carried over from a previous login, if any.
    pub session_token: Option<SecretString>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("CONSTRUCTO_API_URL")?;
        let timeout_secs = get_env_or_default(
            "CONSTRUCTO_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CONSTRUCTO_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let session_token = get_optional_env("CONSTRUCTO_SESSION_TOKEN").map(SecretString::from);

        let mut config = Self::new(api_url)?;
        config.timeout = Duration::from_secs(timeout_secs);
        config.session_token = session_token;
        Ok(config)
    }

    /// Create a configuration for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if the URL does not parse or is
    /// not http(s).
    pub fn new(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_url = api_url.into();
        let parsed = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidApiUrl(api_url.clone(), e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl(
                api_url,
                "scheme must be http or https".to_string(),
            ));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_token: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
