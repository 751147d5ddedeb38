//! Logging infrastructure for geopothole.
//!
//! Provides structured logging to a file and to stderr:
//! - Appends to the configured log file (`~/.geopothole/geopothole.log` by default)
//! - Mirrors events to stderr so stdout stays free for command output
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the log file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize the logging system.
///
/// Creates the log file's parent directory if needed and installs a global
/// subscriber writing to both the file and stderr. Existing log content is
/// kept; new events are appended.
///
/// # Arguments
///
/// * `log_file` - Path of the log file
/// * `verbose` - Default to `debug` instead of `info` when RUST_LOG is unset
///
/// # Errors
///
/// Returns error if the log path has no file name or its directory cannot be created.
pub fn init_logging(log_file: &Path, verbose: bool) -> Result<LoggingGuard, io::Error> {
    let (log_dir, file_name) = split_log_path(log_file)?;
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path: log_dir.join(file_name),
    })
}

/// Filter directive used when RUST_LOG is not set.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Split a log path into its directory and file name.
///
/// A bare file name is placed in the current directory.
fn split_log_path(log_file: &Path) -> Result<(PathBuf, String), io::Error> {
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log path has no file name: {}", log_file.display()),
            )
        })?
        .to_string();

    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/geopothole.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, "geopothole.log");
    }

    #[test]
    fn test_split_bare_file_name() {
        let (dir, name) = split_log_path(Path::new("geopothole.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "geopothole.log");
    }

    #[test]
    fn test_split_rejects_directory_only_path() {
        let err = split_log_path(Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
