//! Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::sync::Weak;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ttl_cache::Shared;

// == Sweeper Handle ==
/// Handle of a running sweeper task.
///
/// Dropping the handle drops the stop sender, which wakes the task and
/// terminates it; that is what keeps a forgotten cache from leaking its
/// task when the last handle goes away.
#[derive(Debug)]
pub(crate) struct SweeperHandle {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the task to stop and waits for it to finish.
    ///
    /// Termination is prompt: the signal interrupts the sleep between
    /// cycles, it never waits for the next tick.
    pub(crate) async fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.task.await;
    }
}

// == Spawn ==
/// Spawns the background task that sweeps expired entries every `interval`.
///
/// The task holds only a weak reference to the cache state, so it cannot
/// keep a dropped cache alive; it exits when signalled, when the stop sender
/// is dropped, or when the state is gone at the start of a cycle.
pub(crate) fn spawn_sweeper<K, V>(
    shared: Weak<Shared<K, V>>,
    interval: Duration,
) -> SweeperHandle
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "sweeper started");

        loop {
            tokio::select! {
                // Resolves on the explicit stop signal and, with an error,
                // when the sender is dropped; both mean stop
                _ = &mut stop_rx => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let Some(state) = shared.upgrade() else {
                break;
            };

            let removed = state.sweep().await;
            if removed > 0 {
                info!(removed, "sweep removed expired entries");
            } else {
                debug!("sweep found no expired entries");
            }
        }

        debug!("sweeper stopped");
    });

    SweeperHandle { stop_tx, task }
}
