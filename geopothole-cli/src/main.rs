//! geopothole CLI - Command-line interface
//!
//! This binary submits GPS-tagged pothole reports using the geopothole library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geopothole::config::config_file_path;

use commands::config::ConfigCommands;
use commands::report::ReportArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "geopothole")]
#[command(version = geopothole::VERSION)]
#[command(about = "Report potholes tagged with the current GPS position", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.geopothole/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a single pothole report
    Report {
        /// Detection confidence (0-100)
        #[arg(long)]
        confidence: f64,

        /// Latitude in decimal degrees (skips gpsd)
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees (skips gpsd)
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Accuracy radius in meters for --lat/--lng (default: 0)
        #[arg(long, requires = "lat")]
        accuracy: Option<f64>,

        /// Report endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// Server base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Seconds to wait for a GPS fix (default: location.timeout)
        #[arg(long)]
        wait: Option<u64>,
    },

    /// Print positions as they arrive from gpsd
    Watch {
        /// Stop after this many fixes
        #[arg(long)]
        count: Option<u64>,
    },

    /// Submit one report per confidence score read from stdin
    Feed {
        /// Skip detections below this confidence (default: detection.min_confidence)
        #[arg(long)]
        min_confidence: Option<f64>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config;

    match cli.command {
        Commands::Config { command } => {
            let path = config_path.unwrap_or_else(config_file_path);
            commands::config::run(command, &path)
        }
        Commands::Report {
            confidence,
            lat,
            lng,
            accuracy,
            endpoint,
            base_url,
            wait,
        } => {
            let runner = CliRunner::new(config_path.as_deref(), cli.verbose)?;
            let args = ReportArgs {
                confidence,
                lat,
                lng,
                accuracy,
                endpoint,
                base_url,
                wait,
            };
            commands::report::run(&runner, args).await
        }
        Commands::Watch { count } => {
            let runner = CliRunner::new(config_path.as_deref(), cli.verbose)?;
            commands::watch::run(&runner, count).await
        }
        Commands::Feed { min_confidence } => {
            let runner = CliRunner::new(config_path.as_deref(), cli.verbose)?;
            commands::feed::run(&runner, min_confidence).await
        }
    }
}
