//! Watch command - print positions as they arrive from gpsd.

use std::sync::Arc;

use geopothole::location::{Coordinate, Position, PositionError, PositionHandler};
use tokio::sync::mpsc;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Position events forwarded from the location service's tasks.
enum WatchEvent {
    Fix(Position),
    Error(PositionError),
}

/// Handler that forwards callbacks onto a channel.
struct ChannelHandler {
    tx: mpsc::UnboundedSender<WatchEvent>,
}

impl PositionHandler for ChannelHandler {
    fn on_position(&self, position: &Position) {
        let _ = self.tx.send(WatchEvent::Fix(position.clone()));
    }

    fn on_error(&self, error: &PositionError) {
        let _ = self.tx.send(WatchEvent::Error(error.clone()));
    }
}

/// Run the watch command.
///
/// Stops after `count` fixes, or on Ctrl+C when no count is given.
pub async fn run(runner: &CliRunner, count: Option<u64>) -> Result<(), CliError> {
    runner.log_startup("watch");

    let Some(service) = runner.location_service()? else {
        return Err(CliError::Config(
            "Location tracking is disabled. Set enabled = true under [location]".to_string(),
        ));
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handler: Arc<dyn PositionHandler> = Arc::new(ChannelHandler { tx });
    let id = service.watch_position(handler, runner.config().position_options());

    println!("Watching gpsd position (Ctrl+C to stop)...");

    let mut fixes: u64 = 0;
    loop {
        let event = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = rx.recv() => event,
        };

        match event {
            Some(WatchEvent::Fix(position)) => {
                fixes += 1;
                println!(
                    "{}  {}",
                    position.timestamp.format("%H:%M:%S%.3f"),
                    Coordinate::from(&position)
                );
                if count.is_some_and(|limit| fixes >= limit) {
                    break;
                }
            }
            Some(WatchEvent::Error(error)) => eprintln!("  {} ({:?})", error, error.code),
            None => break,
        }
    }

    service.clear_watch(id);
    info!(fixes, "Watch finished");
    Ok(())
}
