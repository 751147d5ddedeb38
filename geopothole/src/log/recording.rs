//! In-memory logger for observing diagnostics.

use std::fmt::Arguments;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::log::{LogLevel, Logger};

/// A single recorded log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that keeps every message in memory.
///
/// Position errors are swallowed by the `Reporter` after logging, so this is
/// the way to observe them from the outside.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries recorded at exactly `level`.
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    /// Returns true if an entry at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|entry| entry.level == level && entry.message.contains(needle))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.lock().push(LogEntry {
            level,
            message: args.to_string(),
        });
    }
}
