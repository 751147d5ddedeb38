//! gpsd location service.
//!
//! Provides position fixes from the gpsd daemon, which fronts GPS receivers
//! (USB dongles, serial modules, phones forwarding NMEA) on Linux.
//!
//! # Design
//!
//! - Every fetch or watch opens its own TCP connection and enables JSON
//!   streaming with `?WATCH`
//! - `get_current_position` and `watch_position` spawn tasks on the tokio
//!   runtime captured at construction
//! - Each watch owns a [`CancellationToken`]; `clear_watch` cancels it and the
//!   task drops its connection
//! - Watches reconnect after connection loss with exponential backoff
//!   (2^n seconds, capped at 60 seconds)
//!
//! # Example
//!
//! ```ignore
//! let service = GpsdLocationService::new(GpsdConfig::default())?;
//! let id = service.watch_position(handler, PositionOptions::tracking());
//! // ...
//! service.clear_watch(id);
//! ```

mod error;
pub mod protocol;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

pub use error::GpsdError;

use super::position::{Position, PositionError, PositionOptions};
use super::service::{LocationService, PositionHandler, WatchId};
use protocol::{parse_fix, WATCH_COMMAND};

/// Default gpsd host.
pub const DEFAULT_GPSD_HOST: &str = "127.0.0.1";

/// Default gpsd port.
pub const DEFAULT_GPSD_PORT: u16 = 2947;

/// Maximum delay between reconnection attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Connection settings for the gpsd daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsdConfig {
    pub host: String,
    pub port: u16,
}

impl GpsdConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` string used for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GpsdConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GPSD_HOST, DEFAULT_GPSD_PORT)
    }
}

/// Location service backed by gpsd.
pub struct GpsdLocationService {
    config: GpsdConfig,
    runtime: Handle,
    watches: Mutex<HashMap<WatchId, CancellationToken>>,
    next_watch_id: AtomicU64,
    last_fix: Arc<Mutex<Option<Position>>>,
}

impl GpsdLocationService {
    /// Create a service using the current tokio runtime.
    pub fn new(config: GpsdConfig) -> Result<Self, GpsdError> {
        let runtime = Handle::try_current().map_err(|_| GpsdError::NoRuntime)?;
        Ok(Self::with_runtime(config, runtime))
    }

    /// Create a service that spawns its tasks on `runtime`.
    pub fn with_runtime(config: GpsdConfig, runtime: Handle) -> Self {
        Self {
            config,
            runtime,
            watches: Mutex::new(HashMap::new()),
            next_watch_id: AtomicU64::new(1),
            last_fix: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &GpsdConfig {
        &self.config
    }

    /// Number of watches that have not been cleared.
    pub fn active_watches(&self) -> usize {
        self.lock_watches().len()
    }

    /// Last fix received by any fetch or watch, if it is no older than `maximum_age`.
    fn cached_fix(&self, maximum_age: Duration) -> Option<Position> {
        if maximum_age.is_zero() {
            return None;
        }
        lock(&*self.last_fix)
            .as_ref()
            .filter(|position| position.age() <= maximum_age)
            .cloned()
    }

    fn lock_watches(&self) -> MutexGuard<'_, HashMap<WatchId, CancellationToken>> {
        self.watches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocationService for GpsdLocationService {
    fn get_current_position(&self, handler: Arc<dyn PositionHandler>, options: PositionOptions) {
        if let Some(position) = self.cached_fix(options.maximum_age) {
            trace!("Serving cached gpsd fix");
            handler.on_position(&position);
            return;
        }

        let address = self.config.address();
        let last_fix = Arc::clone(&self.last_fix);

        self.runtime.spawn(async move {
            let fetch = async {
                let mut connection = GpsdConnection::open(&address).await?;
                connection.next_fix(options.enable_high_accuracy).await
            };

            match tokio::time::timeout(options.timeout, fetch).await {
                Ok(Ok(position)) => {
                    *lock(&*last_fix) = Some(position.clone());
                    handler.on_position(&position);
                }
                Ok(Err(e)) => handler.on_error(&e.to_position_error()),
                Err(_) => handler.on_error(&timeout_error(options.timeout)),
            }
        });
    }

    fn watch_position(
        &self,
        handler: Arc<dyn PositionHandler>,
        options: PositionOptions,
    ) -> WatchId {
        let id = WatchId(self.next_watch_id.fetch_add(1, Ordering::Relaxed));
        let token = CancellationToken::new();
        self.lock_watches().insert(id, token.clone());

        let watch = Watch {
            id,
            address: self.config.address(),
            options,
            handler,
            last_fix: Arc::clone(&self.last_fix),
            cancellation: token,
        };
        self.runtime.spawn(watch.run());

        id
    }

    fn clear_watch(&self, id: WatchId) {
        if let Some(token) = self.lock_watches().remove(&id) {
            token.cancel();
            debug!(watch = %id, "gpsd watch cleared");
        }
    }
}

impl Drop for GpsdLocationService {
    fn drop(&mut self) {
        for (_, token) in self.lock_watches().drain() {
            token.cancel();
        }
    }
}

/// A continuous subscription running as its own task.
struct Watch {
    id: WatchId,
    address: String,
    options: PositionOptions,
    handler: Arc<dyn PositionHandler>,
    last_fix: Arc<Mutex<Option<Position>>>,
    cancellation: CancellationToken,
}

impl Watch {
    async fn run(self) {
        info!(watch = %self.id, address = %self.address, "gpsd watch started");

        let mut consecutive_errors: u32 = 0;
        let mut fixes: u64 = 0;

        'session: loop {
            if consecutive_errors > 0 {
                let backoff = calculate_backoff(consecutive_errors);
                debug!(
                    backoff_secs = backoff.as_secs(),
                    consecutive_errors, "Backing off before reconnecting to gpsd"
                );
                tokio::select! {
                    _ = self.cancellation.cancelled() => break 'session,
                    _ = tokio::time::sleep(backoff) => {}
                }
            }

            let opened = tokio::select! {
                _ = self.cancellation.cancelled() => break 'session,
                result = GpsdConnection::open(&self.address) => result,
            };

            let mut connection = match opened {
                Ok(connection) => connection,
                Err(e) => {
                    consecutive_errors += 1;
                    warn!(error = %e, consecutive_errors, "gpsd connection failed");
                    self.handler.on_error(&e.to_position_error());
                    continue;
                }
            };

            loop {
                let next = tokio::select! {
                    _ = self.cancellation.cancelled() => break 'session,
                    result = tokio::time::timeout(
                        self.options.timeout,
                        connection.next_fix(self.options.enable_high_accuracy),
                    ) => result,
                };

                match next {
                    Ok(Ok(position)) => {
                        consecutive_errors = 0;
                        fixes += 1;
                        if fixes == 1 {
                            info!(
                                lat = format!("{:.5}", position.coords.latitude),
                                lon = format!("{:.5}", position.coords.longitude),
                                accuracy_m = format!("{:.1}", position.coords.accuracy),
                                "First gpsd fix"
                            );
                        }
                        *lock(&*self.last_fix) = Some(position.clone());
                        self.handler.on_position(&position);
                    }
                    Ok(Err(e)) => {
                        consecutive_errors += 1;
                        warn!(error = %e, "gpsd stream interrupted");
                        self.handler.on_error(&e.to_position_error());
                        continue 'session;
                    }
                    Err(_) => {
                        trace!("No gpsd fix within acquisition timeout");
                        self.handler.on_error(&timeout_error(self.options.timeout));
                    }
                }
            }
        }

        info!(watch = %self.id, fixes, "gpsd watch stopped");
    }
}

/// A streaming connection to gpsd.
struct GpsdConnection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    // Dropping the write half shuts the socket down, so it lives as long as the reader.
    _writer: OwnedWriteHalf,
}

impl GpsdConnection {
    async fn open(address: &str) -> Result<Self, GpsdError> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|source| GpsdError::Connect {
                address: address.to_string(),
                source,
            })?;

        let (reader, mut writer) = stream.into_split();
        writer.write_all(WATCH_COMMAND).await?;

        Ok(Self {
            lines: BufReader::new(reader).lines(),
            _writer: writer,
        })
    }

    /// Read reports until a usable fix arrives.
    async fn next_fix(&mut self, require_3d: bool) -> Result<Position, GpsdError> {
        while let Some(line) = self.lines.next_line().await? {
            if let Some(position) = parse_fix(&line, require_3d) {
                return Ok(position);
            }
        }
        Err(GpsdError::Disconnected)
    }
}

fn timeout_error(timeout: Duration) -> PositionError {
    PositionError::timeout(format!(
        "No position fix from gpsd within {}ms",
        timeout.as_millis()
    ))
}

/// Calculate exponential backoff: 2^n seconds, capped at MAX_BACKOFF.
fn calculate_backoff(consecutive_errors: u32) -> Duration {
    let secs = 2u64.saturating_pow(consecutive_errors.min(20));
    Duration::from_secs(secs).min(MAX_BACKOFF)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
