//! Device location tracking.
//!
//! This module models the platform location capability the reporter depends
//! on, and provides a gpsd-backed implementation of it.
//!
//! # Architecture
//!
//! ```text
//! LocationService (platform capability)
//!     │
//!     ├── get_current_position ──┐
//!     ├── watch_position ────────┼──► PositionHandler::on_position / on_error
//!     └── clear_watch(WatchId)   │
//!                                └──► Reporter's coordinate tracker
//! ```
//!
//! Callbacks are dispatched through the [`PositionHandler`] trait object
//! handed to the service, so the service never needs to know who consumes
//! the positions.
//!
//! # Components
//!
//! - `coordinate` - `Coordinate`, the stored lat/lng/accuracy triple
//! - `position` - Platform position objects, errors and acquisition options
//! - `service` - `LocationService` and `PositionHandler` traits, `WatchId`
//! - [`gpsd`] - `GpsdLocationService`, backed by the gpsd JSON protocol

mod coordinate;
pub mod gpsd;
mod position;
mod service;

pub use coordinate::Coordinate;
pub use gpsd::{GpsdConfig, GpsdError, GpsdLocationService};
pub use position::{Coords, Position, PositionError, PositionErrorCode, PositionOptions};
pub use service::{LocationService, PositionHandler, WatchId};
