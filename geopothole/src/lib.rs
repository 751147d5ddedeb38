//! geopothole - GPS-tagged pothole reporting
//!
//! This library tracks the device position through a platform location
//! service and submits pothole detections, tagged with that position, to a
//! reporting server.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use geopothole::config::ConfigFile;
//! use geopothole::location::{GpsdLocationService, LocationService};
//! use geopothole::log::TracingLogger;
//! use geopothole::reporter::Reporter;
//! use geopothole::transport::ReqwestTransport;
//!
//! let config = ConfigFile::load()?;
//! let transport = ReqwestTransport::with_base_url(&config.server.base_url)?;
//! let location: Arc<dyn LocationService> =
//!     Arc::new(GpsdLocationService::new(config.gpsd_config())?);
//!
//! let reporter = Reporter::new(
//!     config.reporter_config(),
//!     transport,
//!     Some(location),
//!     Arc::new(TracingLogger),
//! );
//!
//! let outcome = reporter.submit_report(87.5).await;
//! ```
//!
//! # Modules
//!
//! - [`reporter`] - Coordinate tracking and report submission
//! - [`location`] - Location service abstraction and the gpsd backend
//! - [`transport`] - JSON-over-HTTP transport
//! - [`config`] - `~/.geopothole/config.ini` handling
//! - [`log`] - Logger abstraction used by the reporter
//! - [`logging`] - Global tracing subscriber setup

pub mod config;
pub mod location;
pub mod log;
pub mod logging;
pub mod reporter;
pub mod transport;

/// Version of the geopothole library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
