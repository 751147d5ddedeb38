//! Holder of the most recent coordinate.

use std::sync::{Arc, PoisonError, RwLock};

use crate::location::{Coordinate, Position, PositionError, PositionHandler};
use crate::log::Logger;
use crate::{log_debug, log_error};

/// Stores the latest coordinate and receives position callbacks.
///
/// This is the handler the reporter hands to its location service. Every
/// write replaces the coordinate wholesale; no history is kept.
pub(super) struct CoordinateTracker {
    coordinate: RwLock<Option<Coordinate>>,
    logger: Arc<dyn Logger>,
}

impl CoordinateTracker {
    pub(super) fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            coordinate: RwLock::new(None),
            logger,
        }
    }

    pub(super) fn current(&self) -> Option<Coordinate> {
        *self
            .coordinate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn replace(&self, coordinate: Coordinate) {
        *self
            .coordinate
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(coordinate);
    }
}

impl PositionHandler for CoordinateTracker {
    fn on_position(&self, position: &Position) {
        let coordinate = Coordinate::from(position);
        self.replace(coordinate);
        log_debug!(self.logger, "GPS coordinates updated: {}", coordinate);
    }

    fn on_error(&self, error: &PositionError) {
        log_error!(self.logger, "Error obtaining GPS coordinates: {}", error.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, RecordingLogger};

    #[test]
    fn test_starts_empty() {
        let tracker = CoordinateTracker::new(Arc::new(RecordingLogger::new()));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_position_replaces_coordinate() {
        let logger = Arc::new(RecordingLogger::new());
        let tracker = CoordinateTracker::new(logger.clone());

        tracker.on_position(&Position::new(1.0, 2.0, 3.0));
        tracker.on_position(&Position::new(4.0, 5.0, 6.0));

        assert_eq!(tracker.current(), Some(Coordinate::new(4.0, 5.0, 6.0)));
        assert_eq!(logger.entries_at(LogLevel::Debug).len(), 2);
    }

    #[test]
    fn test_error_keeps_coordinate() {
        let logger = Arc::new(RecordingLogger::new());
        let tracker = CoordinateTracker::new(logger.clone());
        tracker.replace(Coordinate::new(1.0, 2.0, 3.0));

        tracker.on_error(&PositionError::permission_denied("User denied geolocation"));

        assert_eq!(tracker.current(), Some(Coordinate::new(1.0, 2.0, 3.0)));
        assert!(logger.contains(LogLevel::Error, "User denied geolocation"));
    }
}
