//! HTTP Client Abstraction
//!
//! Async HTTP operations for the catalog API and playback-URL requests.
//! The verb set is deliberately small: the catalog API is GET-only apart
//! from the playback-URL endpoint, which is a JSON POST.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{BridgeError, Result};

/// HTTP method types used by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Head,
}

/// HTTP request builder.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Shorthand for a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attach a JSON body and set the content type.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(Bytes::from(json));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Get response body as UTF-8 string.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid UTF-8: {}", e)))
    }

    /// Check if response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts.
    pub max_attempts: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Whether to use exponential backoff.
    pub use_exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            use_exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries. Used where the caller owns failure
    /// semantics (e.g., source resolution surfaces the first error).
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Async HTTP client trait.
///
/// Implementations should handle connection pooling, TLS, and retry with
/// backoff. The core layers above only see a request in, a response or a
/// [`BridgeError`] out.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest};
///
/// async fn fetch_listing(client: &dyn HttpClient) -> bridge_traits::Result<String> {
///     let response = client.execute(HttpRequest::get("https://api.example.com/categories")).await?;
///     response.text()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - Request times out
    /// - Maximum retries exceeded
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Execute an HTTP request with a custom retry policy.
    async fn execute_with_retry(
        &self,
        request: HttpRequest,
        policy: RetryPolicy,
    ) -> Result<HttpResponse> {
        // Default implementation: just call execute.
        // Implementations can override for custom retry logic.
        let _ = policy;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_request_builder() {
        let request = HttpRequest::get("https://example.com/categories")
            .header("User-Agent", "test")
            .timeout(Duration::from_secs(30));

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://example.com/categories");
        assert_eq!(request.headers.get("User-Agent"), Some(&"test".to_string()));
        assert!(request.body.is_none());
    }

    #[test]
    fn json_body_sets_content_type() {
        #[derive(serde::Serialize)]
        struct Payload<'a> {
            content_id: &'a str,
        }

        let request = HttpRequest::post("https://example.com/playback")
            .json(&Payload { content_id: "abc" })
            .unwrap();

        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(request.body.is_some());
    }

    #[test]
    fn http_response_status_checks() {
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from("test"),
        };

        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn retry_policy_none_is_single_attempt() {
        assert_eq!(RetryPolicy::none().max_attempts, 1);
    }
}
