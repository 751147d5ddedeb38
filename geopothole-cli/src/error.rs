//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geopothole::config::ConfigFileError;
use geopothole::location::GpsdError;
use geopothole::transport::TransportError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to load or save the config file
    ConfigFile(ConfigFileError),
    /// Failed to set up the HTTP transport (client or base URL)
    Transport(TransportError),
    /// Failed to set up the gpsd location service
    Location(GpsdError),
    /// Failed to read input or write output
    Io(std::io::Error),
    /// The server or transport rejected a report
    ReportFailed(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::ConfigFile(_) = self {
            eprintln!();
            eprintln!("Check the configuration file:");
            eprintln!("  geopothole config path");
            eprintln!("  geopothole config init --force   (restore defaults)");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Transport(e) => write!(f, "HTTP transport error: {}", e),
            CliError::Location(e) => write!(f, "Location service error: {}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::ReportFailed(msg) => write!(f, "Report failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Transport(e) => Some(e),
            CliError::Location(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        CliError::Transport(e)
    }
}

impl From<GpsdError> for CliError {
    fn from(e: GpsdError) -> Self {
        CliError::Location(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_failed_message() {
        let err = CliError::ReportFailed("GPS coordinates not available".to_string());
        assert_eq!(err.to_string(), "Report failed: GPS coordinates not available");
    }

    #[test]
    fn test_config_file_error_is_source() {
        let err: CliError = ConfigFileError::WriteError("disk full".to_string()).into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_transport_error_prefix_not_repeated() {
        let err: CliError = TransportError::Client("no TLS backend".to_string()).into();
        assert_eq!(
            err.to_string(),
            "HTTP transport error: Failed to create HTTP client: no TLS backend"
        );
        assert_eq!(err.to_string().matches("Failed to create HTTP client").count(), 1);
    }

    #[test]
    fn test_invalid_base_url_not_labelled_as_client_failure() {
        let err: CliError = TransportError::InvalidUrl {
            url: "localhost:5000/".to_string(),
            reason: "relative URL without a base".to_string(),
        }
        .into();
        let message = err.to_string();
        assert!(message.starts_with("HTTP transport error: Invalid endpoint URL"));
        assert!(!message.contains("Failed to create HTTP client"));
    }
}
