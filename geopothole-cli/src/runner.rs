//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and creation of the
//! location service and reporter so command handlers stay small.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use geopothole::config::{config_file_path, ConfigFile, ServerSettings};
use geopothole::location::{GpsdLocationService, LocationService};
use geopothole::log::TracingLogger;
use geopothole::logging::{init_logging, LoggingGuard};
use geopothole::reporter::Reporter;
use geopothole::transport::ReqwestTransport;
use tracing::{debug, info};

use crate::error::CliError;

/// How often to check for a first fix while waiting.
const FIX_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    /// Path the configuration was loaded from
    config_path: PathBuf,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to load instead of `~/.geopothole/config.ini`
    /// * `verbose` - When true, defaults to debug-level logging
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let logging_guard = init_logging(&config.logging.file, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("geopothole v{}", geopothole::VERSION);
        info!("geopothole CLI: {} command", command);
        debug!(
            config = %self.config_path.display(),
            log_file = %self.logging_guard.path().display(),
            "Configuration loaded"
        );
    }

    /// Create the gpsd location service, or `None` when tracking is disabled.
    pub fn location_service(&self) -> Result<Option<Arc<dyn LocationService>>, CliError> {
        if !self.config.location.enabled {
            info!("Location tracking disabled in config");
            return Ok(None);
        }

        let service = GpsdLocationService::new(self.config.gpsd_config())?;
        info!(address = %service.config().address(), "Using gpsd location service");
        Ok(Some(Arc::new(service)))
    }

    /// Create a reporter posting to `server`.
    ///
    /// Tracking starts immediately when `location` is `Some`.
    pub fn reporter(
        &self,
        server: &ServerSettings,
        location: Option<Arc<dyn LocationService>>,
    ) -> Result<Reporter<ReqwestTransport>, CliError> {
        let transport = ReqwestTransport::with_base_url(&server.base_url)?;

        let mut reporter_config = self.config.reporter_config();
        reporter_config.endpoint = server.endpoint.clone();

        info!(
            base_url = %server.base_url,
            endpoint = %server.endpoint,
            "Reporter created"
        );
        Ok(Reporter::new(
            reporter_config,
            transport,
            location,
            Arc::new(TracingLogger),
        ))
    }
}

/// Wait until the reporter holds a coordinate or `limit` elapses.
///
/// Returns true if a coordinate is available.
pub async fn wait_for_fix(reporter: &Reporter<ReqwestTransport>, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if reporter.coordinate().is_some() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(FIX_POLL_INTERVAL).await;
    }
}
