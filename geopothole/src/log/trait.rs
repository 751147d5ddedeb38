//! Logger trait and macros.

use std::fmt::{self, Arguments};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic sink for library components.
///
/// Implementations must be `Send + Sync`: position callbacks arrive on
/// location service tasks while reports are submitted from the caller's task.
pub trait Logger: Send + Sync {
    /// Record one message.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Whether messages at `level` are kept.
    ///
    /// The `log_*!` macros skip formatting entirely when this is false.
    fn enabled(&self, level: LogLevel) -> bool {
        let _ = level;
        true
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        let logger = &$logger;
        if logger.enabled($level) {
            logger.log($level, format_args!($($arg)*));
        }
    }};
}

/// Log a trace message through a [`Logger`](crate::log::Logger).
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $crate::__log_at!($logger, $crate::log::LogLevel::Trace, $($arg)*)
    };
}

/// Log a debug message through a [`Logger`](crate::log::Logger).
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::__log_at!($logger, $crate::log::LogLevel::Debug, $($arg)*)
    };
}

/// Log an info message through a [`Logger`](crate::log::Logger).
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::__log_at!($logger, $crate::log::LogLevel::Info, $($arg)*)
    };
}

/// Log a warning through a [`Logger`](crate::log::Logger).
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::__log_at!($logger, $crate::log::LogLevel::Warn, $($arg)*)
    };
}

/// Log an error through a [`Logger`](crate::log::Logger).
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::__log_at!($logger, $crate::log::LogLevel::Error, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts how often it is formatted.
    struct Probe<'a>(&'a AtomicUsize);

    impl fmt::Display for Probe<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fetch_add(1, Ordering::SeqCst);
            f.write_str("probe")
        }
    }

    /// Keeps only errors and formats what it keeps.
    struct ErrorsOnly;

    impl Logger for ErrorsOnly {
        fn log(&self, _level: LogLevel, args: Arguments<'_>) {
            let _ = args.to_string();
        }

        fn enabled(&self, level: LogLevel) -> bool {
            level >= LogLevel::Error
        }
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
        assert_eq!(LogLevel::Debug.to_string(), "DEBUG");
    }

    #[test]
    fn test_disabled_level_skips_formatting() {
        let formatted = AtomicUsize::new(0);
        let logger: Arc<dyn Logger> = Arc::new(ErrorsOnly);

        log_debug!(logger, "GPS coordinates updated: {}", Probe(&formatted));
        assert_eq!(formatted.load(Ordering::SeqCst), 0);

        log_error!(logger, "Error reporting pothole: {}", Probe(&formatted));
        assert_eq!(formatted.load(Ordering::SeqCst), 1);
    }
}
