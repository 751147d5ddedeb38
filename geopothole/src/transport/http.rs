//! reqwest-backed transport.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{ReportTransport, TransportError, TransportResponse};

/// Default server base URL for relative endpoints.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// User-Agent sent with every report.
const USER_AGENT: &str = concat!("geopothole/", env!("CARGO_PKG_VERSION"));

/// HTTP transport using a reusable `reqwest::Client`.
///
/// Relative endpoints such as `/api/report-pothole` are resolved against the
/// base URL. No request timeout is configured; callers that want one wrap the
/// submission future themselves.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Option<Url>,
}

impl ReqwestTransport {
    /// Create a transport that only accepts absolute endpoint URLs.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Create a transport that resolves relative endpoints against `base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self, TransportError> {
        let base = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url: Some(base),
            ..Self::new()?
        })
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Turn an endpoint into an absolute URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, TransportError> {
        if let Ok(url) = Url::parse(endpoint) {
            return Ok(url);
        }

        let invalid = |reason: String| TransportError::InvalidUrl {
            url: endpoint.to_string(),
            reason,
        };

        match &self.base_url {
            Some(base) => base.join(endpoint).map_err(|e| invalid(e.to_string())),
            None => Err(invalid("relative URL without a base URL".to_string())),
        }
    }
}

impl ReportTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(url)?;
        trace!(url = %url, "HTTP POST request starting");

        let response = match self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    url = %url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(TransportError::Request(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        debug!(url = %url, status, "HTTP response received");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_endpoint() {
        let transport = ReqwestTransport::with_base_url(DEFAULT_BASE_URL).unwrap();
        let url = transport.resolve("/api/report-pothole").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/report-pothole");
    }

    #[test]
    fn test_resolve_absolute_endpoint_ignores_base() {
        let transport = ReqwestTransport::with_base_url(DEFAULT_BASE_URL).unwrap();
        let url = transport.resolve("https://potholes.example.org/report").unwrap();
        assert_eq!(url.as_str(), "https://potholes.example.org/report");
    }

    #[test]
    fn test_resolve_relative_without_base_fails() {
        let transport = ReqwestTransport::new().unwrap();
        let result = transport.resolve("/api/report-pothole");
        assert!(matches!(result, Err(TransportError::InvalidUrl { .. })));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ReqwestTransport::with_base_url("not a url");
        assert!(matches!(result, Err(TransportError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = ReqwestTransport::new().unwrap();
        let url = format!("http://127.0.0.1:{port}/api/report-pothole");
        let result = transport.post_json(&url, &serde_json::json!({})).await;

        match result {
            Err(TransportError::Request(message)) => assert!(!message.is_empty()),
            other => panic!("expected request error, got {other:?}"),
        }
    }
}
