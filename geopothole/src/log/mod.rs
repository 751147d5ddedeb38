//! Logging abstraction layer.
//!
//! Library components never talk to `tracing` directly when emitting
//! diagnostics a caller may want to observe. They hold an `Arc<dyn Logger>`
//! instead, which makes the diagnostic stream injectable:
//!
//! - [`TracingLogger`]: production adapter that delegates to `tracing`
//! - [`NoOpLogger`]: discards everything
//! - [`RecordingLogger`]: keeps every entry in memory for inspection
//!
//! # Usage
//!
//! ```
//! use geopothole::log::{Logger, RecordingLogger, LogLevel};
//! use geopothole::log_error;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(RecordingLogger::new());
//! log_error!(logger, "Error obtaining GPS coordinates: {}", "timeout");
//!
//! assert!(logger.contains(LogLevel::Error, "timeout"));
//! ```

mod noop;
mod recording;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use recording::{LogEntry, RecordingLogger};
pub use tracing_adapter::TracingLogger;
