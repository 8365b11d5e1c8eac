//! Help-desk REST API client
//!
//! Wraps JSON requests to `{origin}/api/v2{endpoint}.json`. Every failure
//! (network error, non-success status, malformed JSON) is logged once and
//! reported to the caller as `None`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Path prefix of the help-desk API
pub const API_BASE: &str = "/api/v2";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching a resource
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API Error: {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Caller-supplied request options
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub params: Vec<(String, String)>,
    /// Merged over the default `Content-Type: application/json`
    pub headers: HeaderMap,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            params: Vec::new(),
            headers: HeaderMap::new(),
        }
    }
}

impl FetchOptions {
    /// Plain GET with no parameters
    pub fn get() -> Self {
        Self::default()
    }

    /// Adds a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Adds or replaces a header
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides the request method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}

/// Client for the help-desk JSON API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    /// Origin plus `API_BASE`, without trailing slash
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the help desk served at `origin`
    ///
    /// # Arguments
    /// * `origin` - Scheme and host, e.g. `https://support.example.com`
    pub fn new(origin: &str) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .user_agent(concat!("deskdash/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self::with_client(http_client, origin))
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(http_client: Client, origin: &str) -> Self {
        Self {
            http_client,
            base_url: format!("{}{}", origin.trim_end_matches('/'), API_BASE),
        }
    }

    /// Full URL for an endpoint such as `/requests`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}.json", self.base_url, endpoint)
    }

    /// Fetches a JSON resource
    ///
    /// # Arguments
    /// * `endpoint` - Path below `/api/v2`, without the `.json` suffix
    /// * `options` - Method, query parameters and extra headers
    ///
    /// # Returns
    /// * `Some(Value)` - The parsed response body, unchanged
    /// * `None` - On any failure; the failure is logged at error level
    pub async fn fetch_resource(&self, endpoint: &str, options: &FetchOptions) -> Option<Value> {
        match self.try_fetch(endpoint, options).await {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::error!(
                    event = "api.fetch_failed",
                    endpoint = endpoint,
                    error = %error,
                    "Failed to fetch {}",
                    endpoint
                );
                None
            }
        }
    }

    async fn try_fetch(&self, endpoint: &str, options: &FetchOptions) -> Result<Value, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers.clone());

        let response = self
            .http_client
            .request(options.method.clone(), self.endpoint_url(endpoint))
            .headers(headers)
            .query(&options.params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
