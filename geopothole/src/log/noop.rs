//! Logger that discards everything.

use std::fmt::Arguments;

use crate::log::{LogLevel, Logger};

/// A logger that keeps nothing.
///
/// For embedding a `Reporter` where its diagnostics are of no interest.
/// Reports every level as disabled, so messages are never formatted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}

    #[inline]
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_every_level_disabled() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        for level in [LogLevel::Trace, LogLevel::Info, LogLevel::Error] {
            assert!(!logger.enabled(level));
        }
        crate::log_error!(logger, "GPS coordinates not available");
    }
}
