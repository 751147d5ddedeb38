//! Default values for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::location::gpsd::{DEFAULT_GPSD_HOST, DEFAULT_GPSD_PORT};
use crate::reporter::DEFAULT_ENDPOINT;
use crate::transport::DEFAULT_BASE_URL;

/// Default acquisition timeout in seconds.
pub const DEFAULT_ACQUISITION_TIMEOUT_SECS: u64 = 5;

/// Default maximum cached fix age in seconds.
pub const DEFAULT_MAXIMUM_AGE_SECS: u64 = 0;

/// Default minimum confidence for the detection feed.
///
/// The reference detector keeps boxes at 0.7 and above; reports use percentages.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 70.0;

/// Default log file name.
pub const DEFAULT_LOG_FILE_NAME: &str = "geopothole.log";

/// Default log file path (~/.geopothole/geopothole.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
            },
            location: LocationSettings {
                enabled: true,
                gpsd_host: DEFAULT_GPSD_HOST.to_string(),
                gpsd_port: DEFAULT_GPSD_PORT,
                high_accuracy: true,
                timeout: DEFAULT_ACQUISITION_TIMEOUT_SECS,
                maximum_age: DEFAULT_MAXIMUM_AGE_SECS,
            },
            detection: DetectionSettings {
                min_confidence: DEFAULT_MIN_CONFIDENCE,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
