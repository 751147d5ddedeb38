//! Bridge from [`Logger`] to `tracing`.

use std::fmt::Arguments;

use tracing::Level;

use crate::log::{LogLevel, Logger};

/// Target used for every event, so reporter diagnostics can be filtered
/// with `RUST_LOG=geopothole::reporter=debug`.
const TARGET: &str = "geopothole::reporter";

/// Logger implementation that delegates to the `tracing` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: TARGET, "{}", args),
            LogLevel::Debug => tracing::debug!(target: TARGET, "{}", args),
            LogLevel::Info => tracing::info!(target: TARGET, "{}", args),
            LogLevel::Warn => tracing::warn!(target: TARGET, "{}", args),
            LogLevel::Error => tracing::error!(target: TARGET, "{}", args),
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: TARGET, Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: TARGET, Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: TARGET, Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: TARGET, Level::WARN),
            LogLevel::Error => tracing::enabled!(target: TARGET, Level::ERROR),
        }
    }
}
