//! Reporter configuration.

use crate::location::PositionOptions;

/// Default report endpoint.
pub const DEFAULT_ENDPOINT: &str = "/api/report-pothole";

/// Configuration for a [`Reporter`](super::Reporter).
#[derive(Debug, Clone, PartialEq)]
pub struct ReporterConfig {
    /// Endpoint reports are POSTed to. Relative paths are resolved by the transport.
    pub endpoint: String,

    /// Options for the initial fetch and the continuous subscription.
    pub tracking: PositionOptions,
}

impl ReporterConfig {
    /// Default configuration with a different endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tracking: PositionOptions::tracking(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = ReporterConfig::default();
        assert_eq!(config.endpoint, "/api/report-pothole");
        assert!(config.tracking.enable_high_accuracy);
        assert_eq!(config.tracking.maximum_age, Duration::ZERO);
        assert_eq!(config.tracking.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_with_endpoint() {
        let config = ReporterConfig::with_endpoint("https://example.org/report");
        assert_eq!(config.endpoint, "https://example.org/report");
        assert_eq!(config.tracking, PositionOptions::tracking());
    }
}
