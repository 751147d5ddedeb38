//! Transport error types.

use thiserror::Error;

/// Errors raised before a usable HTTP response is available.
///
/// The display text is the underlying fault description, which the reporter
/// surfaces verbatim as the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The endpoint could not be turned into an absolute URL.
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Sending the request failed (connection refused, DNS, TLS, ...).
    #[error("{0}")]
    Request(String),

    /// The response body could not be read.
    #[error("Failed to read response: {0}")]
    Body(String),
}
