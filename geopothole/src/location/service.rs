//! Platform location capability traits.

use std::fmt;
use std::sync::Arc;

use super::position::{Position, PositionError, PositionOptions};

/// Opaque handle for an active continuous position feed.
///
/// Only used to cancel the feed via [`LocationService::clear_watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(pub u64);

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watch#{}", self.0)
    }
}

/// Receiver of position updates and errors.
///
/// A location service invokes these from its own tasks, possibly while the
/// consumer is doing something else. Each invocation must be short and must
/// not block.
pub trait PositionHandler: Send + Sync {
    /// A new position fix is available.
    fn on_position(&self, position: &Position);

    /// A fix could not be obtained.
    fn on_error(&self, error: &PositionError);
}

/// Platform location capability.
///
/// Results are delivered asynchronously to the supplied handler; the methods
/// themselves return immediately.
pub trait LocationService: Send + Sync {
    /// Fetch a single position.
    ///
    /// Exactly one of `on_position` / `on_error` is eventually invoked.
    fn get_current_position(&self, handler: Arc<dyn PositionHandler>, options: PositionOptions);

    /// Start a continuous position subscription.
    fn watch_position(
        &self,
        handler: Arc<dyn PositionHandler>,
        options: PositionOptions,
    ) -> WatchId;

    /// Cancel a subscription. Unknown or already-cleared ids are ignored.
    fn clear_watch(&self, id: WatchId);
}
