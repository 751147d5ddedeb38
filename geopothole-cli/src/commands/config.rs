//! Configuration management CLI commands.
//!
//! Provides `config path`, `config init` and `config show` for inspecting
//! and creating the configuration file.

use std::path::Path;

use clap::Subcommand;
use geopothole::config::ConfigFile;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (file values over defaults)
    Show,
}

/// Run a config subcommand against the config file at `path`.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(path),
        ConfigCommands::Init { force } => run_init(path, force),
        ConfigCommands::Show => run_show(path),
    }
}

fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    if !path.exists() {
        println!("(file does not exist; defaults are in use)");
    }
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
    } else if ConfigFile::ensure_exists_at(path)? {
        println!("Created {}", path.display());
    } else {
        println!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}

fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;
    print!("{}", config.to_ini_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_then_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        run_init(&path, false).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "[server]\nendpoint = /custom\n").unwrap();
        run_init(&path, false).unwrap();
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.server.endpoint, "/custom");

        run_init(&path, true).unwrap();
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.server.endpoint, "/api/report-pothole");
    }

    #[test]
    fn test_show_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[location]\ngpsd_port = nope\n").unwrap();

        assert!(matches!(run_show(&path), Err(CliError::ConfigFile(_))));
    }
}
