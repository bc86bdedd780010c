//! Turn timer that ends overdue turns on a fixed sweep.
//!
//! Deadlines live on each battle's state; the worker only decides when to
//! look. Expiry goes through the same engine hand-off as an explicit end of
//! turn and is recorded in the battle log.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::server::BattleServer;

/// Handle to a running turn timer.
///
/// Dropping the handle also stops the worker.
pub struct TurnTimer {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl TurnTimer {
    /// Spawns a worker that sweeps `server` at its configured interval.
    pub fn spawn(server: BattleServer) -> Self {
        let every = server.config().timer_sweep_interval;
        Self::spawn_with_interval(server, every)
    }

    pub fn spawn_with_interval(server: BattleServer, every: Duration) -> Self {
        let (shutdown, stop_rx) = oneshot::channel();
        let worker = TimerWorker {
            server,
            every: every.max(Duration::from_millis(1)),
            stop_rx,
        };
        Self {
            shutdown,
            handle: tokio::spawn(worker.run()),
        }
    }

    /// Stops the worker and waits for it to finish its current sweep.
    pub async fn shutdown(self) -> Result<()> {
        let Self { shutdown, handle } = self;
        // The worker may already be gone; joining still reports how it ended.
        let _ = shutdown.send(());
        handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

struct TimerWorker {
    server: BattleServer,
    every: Duration,
    stop_rx: oneshot::Receiver<()>,
}

impl TimerWorker {
    /// Main worker loop.
    async fn run(mut self) {
        info!(target: "arena::timer", every_ms = self.every.as_millis() as u64, "turn timer started");

        let mut ticker = time::interval(self.every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut self.stop_rx => break,
                _ = ticker.tick() => {
                    let expired = self.server.expire_overdue().await;
                    if !expired.is_empty() {
                        debug!(target: "arena::timer", count = expired.len(), "ended overdue turns");
                    }
                }
            }
        }

        info!(target: "arena::timer", "turn timer stopped");
    }
}
