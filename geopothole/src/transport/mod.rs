//! HTTP transport abstraction for report submission.
//!
//! The reporter only needs one operation: POST a JSON body and get back the
//! status code and raw body. [`ReportTransport`] captures that so tests can
//! substitute a scripted transport, and [`ReqwestTransport`] is the real
//! implementation.

mod error;
mod http;

use std::future::Future;

use serde_json::Value;

pub use error::TransportError;
pub use http::{ReqwestTransport, DEFAULT_BASE_URL};

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for sending JSON POST requests.
///
/// Non-2xx statuses are not errors at this level: they are returned as a
/// normal [`TransportResponse`] so the caller can read the body.
pub trait ReportTransport: Send + Sync {
    /// POST `body` as `application/json` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the URL is invalid, the request could
    /// not be sent or the response body could not be read.
    fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(201, "").is_success());
        assert!(TransportResponse::new(299, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(400, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }

    #[test]
    fn test_json_response_body() {
        let response = TransportResponse::json(200, &serde_json::json!({"id": 42}));
        assert_eq!(response.body, br#"{"id":42}"#.to_vec());
    }
}
