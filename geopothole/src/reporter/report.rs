//! Wire body of a pothole report.

use serde::{Deserialize, Serialize};

use crate::location::Coordinate;

/// JSON body sent to the report endpoint:
/// `{"lat": .., "lng": .., "confidence": .., "accuracy": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotholeReport {
    pub lat: f64,
    pub lng: f64,
    /// Detector confidence, passed through unmodified.
    pub confidence: f64,
    pub accuracy: f64,
}

impl PotholeReport {
    pub fn new(coordinate: Coordinate, confidence: f64) -> Self {
        Self {
            lat: coordinate.lat,
            lng: coordinate.lng,
            confidence,
            accuracy: coordinate.accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape() {
        let report = PotholeReport::new(Coordinate::new(1.0, 2.0, 3.0), 95.7);
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"lat": 1.0, "lng": 2.0, "confidence": 95.7, "accuracy": 3.0})
        );
    }
}
