//! Position objects delivered by a location service.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Default acquisition timeout used when tracking (5 seconds).
pub const DEFAULT_ACQUISITION_TIMEOUT: Duration = Duration::from_secs(5);

/// Geographic coordinates reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    pub accuracy: f64,
}

/// A position fix from the platform location service.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub coords: Coords,
    /// When the fix was measured.
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// Create a position measured now.
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self::at(latitude, longitude, accuracy, Utc::now())
    }

    /// Create a position measured at `timestamp`.
    pub fn at(latitude: f64, longitude: f64, accuracy: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            coords: Coords {
                latitude,
                longitude,
                accuracy,
            },
            timestamp,
        }
    }

    /// Age of this fix relative to now. Future timestamps count as zero.
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.timestamp)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Why a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionErrorCode {
    PermissionDenied = 1,
    PositionUnavailable = 2,
    Timeout = 3,
}

/// Error object delivered to [`PositionHandler::on_error`].
///
/// [`PositionHandler::on_error`]: super::PositionHandler::on_error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PositionError {
    pub code: PositionErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl PositionError {
    pub fn new(code: PositionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(PositionErrorCode::PermissionDenied, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(PositionErrorCode::PositionUnavailable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PositionErrorCode::Timeout, message)
    }
}

/// Options for one-shot fetches and continuous subscriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOptions {
    /// Ask the platform for its most precise fix.
    pub enable_high_accuracy: bool,

    /// Maximum age of a cached fix that may be returned. Zero disables the cache.
    pub maximum_age: Duration,

    /// How long to wait for each fix before reporting a timeout.
    pub timeout: Duration,
}

impl PositionOptions {
    /// Options used by the reporter: high accuracy, no cached positions,
    /// 5-second acquisition timeout.
    pub fn tracking() -> Self {
        Self {
            enable_high_accuracy: true,
            maximum_age: Duration::ZERO,
            timeout: DEFAULT_ACQUISITION_TIMEOUT,
        }
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            maximum_age: Duration::ZERO,
            timeout: DEFAULT_ACQUISITION_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_options() {
        let options = PositionOptions::tracking();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.maximum_age, Duration::ZERO);
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_position_error_displays_message() {
        let error = PositionError::timeout("No fix within 5000ms");
        assert_eq!(error.code, PositionErrorCode::Timeout);
        assert_eq!(error.to_string(), "No fix within 5000ms");
    }

    #[test]
    fn test_age_of_old_fix() {
        let position = Position::at(0.0, 0.0, 0.0, Utc::now() - chrono::Duration::seconds(30));
        assert!(position.age() >= Duration::from_secs(29));
    }

    #[test]
    fn test_age_of_future_fix_is_zero() {
        let position = Position::at(0.0, 0.0, 0.0, Utc::now() + chrono::Duration::seconds(30));
        assert_eq!(position.age(), Duration::ZERO);
    }
}
