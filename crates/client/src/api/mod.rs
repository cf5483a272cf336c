//! Constructo REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the backend is source of truth -
//!   no local sync, direct API calls
//! - In-memory caching via `moka` for catalog responses (5 minute TTL);
//!   cart, order, and payment endpoints are never cached
//! - Bearer-token sessions: `register`/`login` capture the token, every
//!   authenticated call attaches it, `logout` drops it
//!
//! # Example
//!
//! ```rust,ignore
//! use constructo_client::{ApiClient, ClientConfig};
//!
//! let api = ApiClient::new(&ClientConfig::from_env()?)?;
//!
//! let user = api.login(&email, "password").await?;
//! let cart = api.add_to_cart(&product.id, 2).await?;
//! ```

mod auth;
mod cart;
mod catalog;
mod orders;
mod payments;
pub mod types;

pub use catalog::{ProductQuery, ProductSort};
pub use types::*;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use moka::future::Cache;
use reqwest::{RequestBuilder, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ClientConfig;
use catalog::CacheValue;

/// Errors that can occur when calling the Constructo API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No session token, or the server rejected it.
    #[error("authentication required")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Server returned a non-success status.
    #[error("API error ({status}): {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail message, or a body excerpt.
        detail: String,
    },
}

impl ApiError {
    /// The server's detail message, when one was returned.
    #[must_use]
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } | Self::NotFound(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Acknowledgement body returned by mutation endpoints.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

/// Extract the `detail` field from a FastAPI-style error body.
///
/// Validation errors carry a structured `detail`; those are stringified.
/// Non-JSON bodies fall back to a short excerpt.
fn error_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.chars().take(200).collect(),
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Constructo backend API.
///
/// Cheaply cloneable; all clones share the HTTP connection pool, the session
/// token, and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    api_url: String,
    session: RwLock<Option<SecretString>>,
    catalog_cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        let catalog_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                api_url: config.api_url.clone(),
                session: RwLock::new(config.session_token.clone()),
                catalog_cache,
            }),
        })
    }

    /// Replace the current session token.
    pub fn set_session_token(&self, token: SecretString) {
        *self.session_lock() = Some(token);
    }

    /// Drop the current session token.
    pub fn clear_session_token(&self) {
        *self.session_lock() = None;
    }

    /// A copy of the current session token, for callers that persist it
    /// (e.g., shells exporting it to the environment).
    #[must_use]
    pub fn session_token(&self) -> Option<SecretString> {
        let guard = match self.inner.session.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    }

    /// Whether a session token is currently held.
    #[must_use]
    pub fn has_session(&self) -> bool {
        match self.inner.session.read() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    fn session_lock(&self) -> std::sync::RwLockWriteGuard<'_, Option<SecretString>> {
        match self.inner.session.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn bearer(&self) -> Option<String> {
        let guard = match self.inner.session.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    /// Build the full URL for an API path (paths start with `/`).
    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.inner.api_url)
    }

    /// Send a request, attach the session token, and decode the response.
    async fn request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let builder = match self.bearer() {
            Some(auth) => builder.header(header::AUTHORIZATION, auth),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(error_detail(&text)));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Constructo API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse Constructo API response"
            );
            ApiError::Parse(e)
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(self.inner.http.get(self.url(path))).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        self.request(self.inner.http.get(self.url(path)).query(query))
            .await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(self.inner.http.post(self.url(path)).json(body))
            .await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(self.inner.http.post(self.url(path))).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(self.inner.http.put(self.url(path)).json(body))
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(self.inner.http.delete(self.url(path))).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_string() {
        assert_eq!(error_detail(r#"{"detail": "Cart is empty"}"#), "Cart is empty");
    }

    #[test]
    fn test_error_detail_structured() {
        // Pydantic validation errors carry a list in `detail`
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "field required"}]}"#;
        let detail = error_detail(body);
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_error_detail_non_json() {
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 400,
            detail: "Cart is empty".to_string(),
        };
        assert_eq!(err.to_string(), "API error (400): Cart is empty");
        assert_eq!(err.server_detail(), Some("Cart is empty"));
    }

    #[test]
    fn test_url_building() {
        let config = crate::config::ClientConfig::new("http://localhost:8000").unwrap();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/orders"), "http://localhost:8000/api/orders");
    }

    #[test]
    fn test_session_token_lifecycle() {
        let config = crate::config::ClientConfig::new("http://localhost:8000").unwrap();
        let client = ApiClient::new(&config).unwrap();

        assert!(!client.has_session());
        client.set_session_token(SecretString::from("token-123".to_string()));
        assert!(client.has_session());
        assert_eq!(client.bearer().unwrap(), "Bearer token-123");
        client.clear_session_token();
        assert!(!client.has_session());
    }
}
