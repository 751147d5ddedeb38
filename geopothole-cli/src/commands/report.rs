//! Report command - submit a single pothole report.

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::error::CliError;
use crate::runner::{wait_for_fix, CliRunner};

/// Arguments for the report command.
pub struct ReportArgs {
    pub confidence: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub accuracy: Option<f64>,
    pub endpoint: Option<String>,
    pub base_url: Option<String>,
    pub wait: Option<u64>,
}

/// Where the reported coordinate comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CoordinateSource {
    /// `--lat/--lng` given; gpsd is not started.
    Manual { lat: f64, lng: f64 },
    Gpsd,
}

impl CoordinateSource {
    fn from_args(args: &ReportArgs) -> Self {
        match args.lat.zip(args.lng) {
            Some((lat, lng)) => Self::Manual { lat, lng },
            None => Self::Gpsd,
        }
    }
}

impl fmt::Display for CoordinateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual { lat, lng } => write!(
                f,
                "manual coordinate {:.6}, {:.6} (gpsd not used; a missing location service is expected)",
                lat, lng
            ),
            Self::Gpsd => write!(f, "gpsd"),
        }
    }
}

/// Run the report command.
///
/// With `--lat/--lng` the coordinate is set manually and gpsd is not used.
/// Otherwise the command waits for a first fix before submitting.
pub async fn run(runner: &CliRunner, args: ReportArgs) -> Result<(), CliError> {
    runner.log_startup("report");
    let config = runner.config();
    let source = CoordinateSource::from_args(&args);
    info!("Coordinate source: {}", source);

    // Resolve server: CLI > config
    let mut server = config.server.clone();
    if let Some(base_url) = args.base_url {
        server.base_url = base_url;
    }
    if let Some(endpoint) = args.endpoint {
        server.endpoint = endpoint;
    }

    let location = match source {
        CoordinateSource::Manual { .. } => None,
        CoordinateSource::Gpsd => runner.location_service()?,
    };

    let reporter = runner.reporter(&server, location)?;

    match source {
        CoordinateSource::Manual { lat, lng } => {
            reporter.set_external_coordinate(lat, lng, args.accuracy)
        }
        CoordinateSource::Gpsd => {
            let wait = Duration::from_secs(args.wait.unwrap_or(config.location.timeout));
            if !wait_for_fix(&reporter, wait).await {
                eprintln!("No GPS fix within {}s", wait.as_secs());
            }
        }
    }

    let outcome = reporter.submit_report(args.confidence).await;
    reporter.stop_tracking();

    println!("{:#}", outcome.to_json());

    match outcome.message() {
        Some(message) => Err(CliError::ReportFailed(message)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(lat: Option<f64>, lng: Option<f64>) -> ReportArgs {
        ReportArgs {
            confidence: 90.0,
            lat,
            lng,
            accuracy: None,
            endpoint: None,
            base_url: None,
            wait: None,
        }
    }

    #[test]
    fn test_manual_source_announces_gpsd_is_skipped() {
        let source = CoordinateSource::from_args(&args(Some(12.9716), Some(77.5946)));
        assert_eq!(
            source,
            CoordinateSource::Manual {
                lat: 12.9716,
                lng: 77.5946
            }
        );
        let text = source.to_string();
        assert!(text.starts_with("manual coordinate 12.971600, 77.594600"));
        assert!(text.contains("gpsd not used"));
    }

    #[test]
    fn test_gpsd_source_without_coordinates() {
        assert_eq!(CoordinateSource::from_args(&args(None, None)), CoordinateSource::Gpsd);
        assert_eq!(CoordinateSource::Gpsd.to_string(), "gpsd");
    }
}
