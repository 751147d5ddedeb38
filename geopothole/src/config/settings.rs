//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;
use std::time::Duration;

use crate::location::{GpsdConfig, PositionOptions};
use crate::reporter::ReporterConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Report server settings
    pub server: ServerSettings,
    /// Location tracking settings
    pub location: LocationSettings,
    /// Detection feed settings
    pub detection: DetectionSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Report server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Base URL relative endpoints are resolved against.
    pub base_url: String,
    /// Report endpoint, relative to `base_url` or absolute.
    pub endpoint: String,
}

/// Location tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    /// Track position through gpsd.
    pub enabled: bool,
    pub gpsd_host: String,
    pub gpsd_port: u16,
    /// Only accept 3D fixes.
    pub high_accuracy: bool,
    /// Acquisition timeout in seconds.
    pub timeout: u64,
    /// Maximum age of a cached fix in seconds (0 = never use the cache).
    pub maximum_age: u64,
}

/// Detection feed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSettings {
    /// Detections below this confidence (0-100) are not reported by `feed`.
    pub min_confidence: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path.
    pub file: PathBuf,
}

impl ConfigFile {
    /// Reporter configuration derived from these settings.
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig {
            endpoint: self.server.endpoint.clone(),
            tracking: self.position_options(),
        }
    }

    /// Acquisition options for tracking.
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.location.high_accuracy,
            maximum_age: Duration::from_secs(self.location.maximum_age),
            timeout: Duration::from_secs(self.location.timeout),
        }
    }

    /// gpsd connection settings.
    pub fn gpsd_config(&self) -> GpsdConfig {
        GpsdConfig::new(self.location.gpsd_host.clone(), self.location.gpsd_port)
    }
}
