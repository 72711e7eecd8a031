//! Expiry Sweep Task
//!
//! Periodically removes expired entries from the in-memory fallback cache.
//! The primary backend expires keys on its own and is not touched.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Handle to a running sweep task.
///
/// Owned by the process lifecycle: started at init, stopped with
/// [`SweepTask::shutdown`] before exit.
#[derive(Debug)]
pub struct SweepTask {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl SweepTask {
    /// Signals the task to stop and waits for it to finish.
    pub async fn shutdown(self) {
        // The receiver is only gone if the task already exited
        let _ = self.shutdown.send(());

        if let Err(e) = self.handle.await {
            warn!("Sweep task did not finish cleanly: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns the background sweep.
///
/// The first sweep runs one full `interval` after start.
///
/// # Example
/// ```ignore
/// let sweep = spawn_sweep_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweep.shutdown().await;
/// ```
pub fn spawn_sweep_task(cache: Arc<CacheStore>, interval: Duration) -> SweepTask {
    let (shutdown, mut stop) = oneshot::channel();

    let handle = tokio::spawn(async move {
        info!("Starting expiry sweep every {:?}", interval);

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Expiry sweep stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.sweep_expired().await;
                    if removed > 0 {
                        info!("Expiry sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
            }
        }
    });

    SweepTask { shutdown, handle }
}
