//! The coordinate stored by the reporter.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::Position;

/// A geographic position with an accuracy radius.
///
/// Serializes as `{"lat": .., "lng": .., "accuracy": ..}`. Accuracy is in
/// meters and defaults to 0 when a source does not report one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    pub lat: f64,

    /// Longitude in degrees (-180 to 180).
    pub lng: f64,

    /// Accuracy radius in meters.
    #[serde(default)]
    pub accuracy: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64, accuracy: f64) -> Self {
        Self { lat, lng, accuracy }
    }
}

impl From<&Position> for Coordinate {
    fn from(position: &Position) -> Self {
        Self {
            lat: position.coords.latitude,
            lng: position.coords.longitude,
            accuracy: position.coords.accuracy,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}, {:.6} (±{:.1}m)",
            self.lat, self.lng, self.accuracy
        )
    }
}
