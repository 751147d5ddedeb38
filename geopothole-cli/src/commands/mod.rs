//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, init, show)
//! - [`feed`] - Submit detections read from stdin
//! - [`report`] - Submit a single report
//! - [`watch`] - Print gpsd positions

pub mod config;
pub mod feed;
pub mod report;
pub mod watch;
