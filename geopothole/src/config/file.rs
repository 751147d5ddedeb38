//! Configuration file handling for ~/.geopothole/config.ini.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geopothole/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        std::fs::write(path, self.to_ini_string())
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Write the default config file at `path` if nothing exists there.
    ///
    /// Returns true if a file was created.
    pub fn ensure_exists_at(path: &Path) -> Result<bool, ConfigFileError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// Commented INI representation, as written by [`ConfigFile::save_to`].
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }
}

/// Get the path to the config directory (~/.geopothole).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geopothole")
}

/// Get the path to the config file (~/.geopothole/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("config.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.server.base_url = "https://potholes.example.org".to_string();
        config.location.enabled = false;
        config.location.gpsd_port = 2948;
        config.detection.min_confidence = 92.5;
        config.logging.file = dir.path().join("geopothole.log");

        config.save_to(&path).unwrap();
        let loaded = ConfigFile::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ensure_exists_at_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        assert!(ConfigFile::ensure_exists_at(&path).unwrap());
        std::fs::write(&path, "[server]\nendpoint = /custom\n").unwrap();
        assert!(!ConfigFile::ensure_exists_at(&path).unwrap());

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.server.endpoint, "/custom");
    }

    #[test]
    fn test_written_file_is_commented() {
        let content = ConfigFile::default().to_ini_string();
        assert!(content.contains("[server]"));
        assert!(content.contains("endpoint = /api/report-pothole"));
        assert!(content.contains("; Seconds to wait for each position fix"));
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with(".geopothole/config.ini"));
    }
}
