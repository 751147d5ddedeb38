//! Pothole report submission.
//!
//! The [`Reporter`] keeps the most recent device coordinate, fed by a
//! [`LocationService`] subscription or by manual overrides, and submits
//! detection reports (coordinate + confidence) to the report endpoint.
//!
//! # Lifecycle
//!
//! 1. Construction starts tracking if a location service was supplied
//!    (one-shot fetch + continuous watch). Without one, an error is logged and
//!    the reporter still accepts manual coordinates.
//! 2. Position callbacks and [`Reporter::set_external_coordinate`] overwrite
//!    the stored coordinate.
//! 3. [`Reporter::submit_report`] POSTs the current coordinate. Every outcome,
//!    including transport faults, comes back as a [`ReportOutcome`].
//! 4. [`Reporter::stop_tracking`] cancels the subscription.
//!
//! # Example
//!
//! ```ignore
//! let transport = ReqwestTransport::with_base_url("http://localhost:5000")?;
//! let reporter = Reporter::new(ReporterConfig::default(), transport, None, logger);
//!
//! reporter.set_external_coordinate(12.9716, 77.5946, None);
//! let outcome = reporter.submit_report(92.3).await;
//! ```

mod config;
mod outcome;
mod report;
mod tracker;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

pub use config::{ReporterConfig, DEFAULT_ENDPOINT};
pub use outcome::{ReportError, ReportOutcome};
pub use report::PotholeReport;

use crate::location::{
    Coordinate, LocationService, Position, PositionError, PositionHandler, WatchId,
};
use crate::log::Logger;
use crate::transport::{ReportTransport, TransportResponse};
use crate::{log_debug, log_error, log_info};
use tracker::CoordinateTracker;

/// Tracks the device position and submits pothole reports.
pub struct Reporter<T: ReportTransport> {
    config: ReporterConfig,
    transport: T,
    location: Option<Arc<dyn LocationService>>,
    tracker: Arc<CoordinateTracker>,
    watch_id: Mutex<Option<WatchId>>,
    logger: Arc<dyn Logger>,
}

impl<T: ReportTransport> Reporter<T> {
    /// Create a reporter.
    ///
    /// Tracking starts immediately when `location` is `Some`. Construction
    /// never fails.
    pub fn new(
        config: ReporterConfig,
        transport: T,
        location: Option<Arc<dyn LocationService>>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let reporter = Self {
            config,
            transport,
            location,
            tracker: Arc::new(CoordinateTracker::new(Arc::clone(&logger))),
            watch_id: Mutex::new(None),
            logger,
        };
        reporter.init_tracking();
        reporter
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch an initial position and subscribe to updates.
    ///
    /// Both share the reporter's position handler. Any previous subscription
    /// is cancelled first.
    pub fn init_tracking(&self) {
        let Some(service) = &self.location else {
            log_error!(
                self.logger,
                "Geolocation is not supported: no location service available"
            );
            return;
        };

        let handler: Arc<dyn PositionHandler> = self.tracker.clone();
        service.get_current_position(Arc::clone(&handler), self.config.tracking.clone());
        let id = service.watch_position(handler, self.config.tracking.clone());

        let previous = self.lock_watch().replace(id);
        if let Some(previous) = previous {
            service.clear_watch(previous);
        }
        log_info!(self.logger, "GPS tracking started ({})", id);
    }

    /// Replace the stored coordinate with one from the platform.
    pub fn on_position_update(&self, position: &Position) {
        self.tracker.on_position(position);
    }

    /// Log a platform position error. The stored coordinate is kept.
    pub fn on_position_error(&self, error: &PositionError) {
        self.tracker.on_error(error);
    }

    /// Cancel the position subscription. Calling it again is a no-op.
    pub fn stop_tracking(&self) {
        let Some(id) = self.lock_watch().take() else {
            return;
        };
        if let Some(service) = &self.location {
            service.clear_watch(id);
        }
        log_info!(self.logger, "GPS tracking stopped ({})", id);
    }

    /// True while a position subscription is active.
    pub fn is_tracking(&self) -> bool {
        self.lock_watch().is_some()
    }

    /// The current coordinate, if any.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.tracker.current()
    }

    /// Overwrite the coordinate with one from an external sensor.
    ///
    /// `accuracy` defaults to 0 meters.
    pub fn set_external_coordinate(&self, lat: f64, lng: f64, accuracy: Option<f64>) {
        let coordinate = Coordinate::new(lat, lng, accuracy.unwrap_or(0.0));
        self.tracker.replace(coordinate);
        log_debug!(self.logger, "External GPS coordinates set: {}", coordinate);
    }

    /// Submit a report for a detection with the given confidence.
    ///
    /// Never fails: every problem is reported through the returned outcome.
    pub async fn submit_report(&self, confidence: f64) -> ReportOutcome {
        let Some(coordinate) = self.coordinate() else {
            return self.fail(ReportError::PositionUnavailable);
        };

        let report = PotholeReport::new(coordinate, confidence);
        let body = match serde_json::to_value(report) {
            Ok(body) => body,
            Err(e) => return self.fail(ReportError::Encode(e.to_string())),
        };

        match self.transport.post_json(&self.config.endpoint, &body).await {
            Ok(response) => self.interpret(response),
            Err(e) => self.fail(ReportError::Transport(e.to_string())),
        }
    }

    fn interpret(&self, response: TransportResponse) -> ReportOutcome {
        let parsed: Value = match serde_json::from_slice(&response.body) {
            Ok(parsed) => parsed,
            Err(e) => return self.fail(ReportError::InvalidResponse(e.to_string())),
        };

        if response.is_success() {
            log_info!(self.logger, "Pothole reported successfully");
            return ReportOutcome::Submitted { data: parsed };
        }

        let message = parsed
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("HTTP {}", response.status));

        self.fail(ReportError::Server {
            status: response.status,
            message,
        })
    }

    fn fail(&self, error: ReportError) -> ReportOutcome {
        log_error!(self.logger, "Error reporting pothole: {}", error);
        ReportOutcome::Failed(error)
    }

    fn lock_watch(&self) -> MutexGuard<'_, Option<WatchId>> {
        self.watch_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, RecordingLogger};
    use crate::transport::TransportError;

    struct StaticTransport(Result<TransportResponse, TransportError>);

    impl ReportTransport for StaticTransport {
        async fn post_json(
            &self,
            _url: &str,
            _body: &Value,
        ) -> Result<TransportResponse, TransportError> {
            self.0.clone()
        }
    }

    fn reporter(
        response: Result<TransportResponse, TransportError>,
    ) -> (Reporter<StaticTransport>, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::new());
        let reporter = Reporter::new(
            ReporterConfig::default(),
            StaticTransport(response),
            None,
            logger.clone(),
        );
        (reporter, logger)
    }

    #[test]
    fn test_missing_capability_is_logged() {
        let (reporter, logger) = reporter(Ok(TransportResponse::new(200, "{}")));
        assert!(logger.contains(LogLevel::Error, "Geolocation is not supported"));
        assert!(!reporter.is_tracking());
        assert!(reporter.coordinate().is_none());
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let (reporter, _) = reporter(Ok(TransportResponse::new(502, "<html>Bad Gateway</html>")));
        reporter.set_external_coordinate(1.0, 2.0, None);

        let outcome = reporter.submit_report(50.0).await;
        assert!(matches!(
            outcome,
            ReportOutcome::Failed(ReportError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_error_without_message_uses_status() {
        let (reporter, _) = reporter(Ok(TransportResponse::new(500, r#"{"status":"error"}"#)));
        reporter.set_external_coordinate(1.0, 2.0, None);

        let outcome = reporter.submit_report(50.0).await;
        assert_eq!(outcome.message().as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn test_success_is_logged() {
        let (reporter, logger) = reporter(Ok(TransportResponse::new(200, r#"{"id":1}"#)));
        reporter.set_external_coordinate(1.0, 2.0, Some(3.0));

        assert!(reporter.submit_report(88.0).await.is_success());
        assert!(logger.contains(LogLevel::Info, "Pothole reported successfully"));
    }
}
