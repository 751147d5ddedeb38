//! Error types for the gpsd location backend.

use thiserror::Error;

use crate::location::PositionError;

/// Errors that can occur while talking to gpsd.
#[derive(Debug, Error)]
pub enum GpsdError {
    /// Could not open a TCP connection to the daemon.
    #[error("Failed to connect to gpsd at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an established connection failed.
    #[error("gpsd I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon closed the connection.
    #[error("gpsd closed the connection")]
    Disconnected,

    /// The service was created outside a tokio runtime.
    #[error("gpsd location service requires a tokio runtime")]
    NoRuntime,
}

impl GpsdError {
    /// Convert into the error object handed to position handlers.
    pub fn to_position_error(&self) -> PositionError {
        PositionError::unavailable(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::PositionErrorCode;

    #[test]
    fn test_to_position_error() {
        let error = GpsdError::Disconnected.to_position_error();
        assert_eq!(error.code, PositionErrorCode::PositionUnavailable);
        assert_eq!(error.message, "gpsd closed the connection");
    }
}
