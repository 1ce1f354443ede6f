//! Background synchronization scheduler.
//!
//! Runs one cycle, waits the poll interval, and repeats. The wait starts when
//! a cycle returns, so cycles never overlap and a slow upstream simply slows
//! the poll rate. There is no cycle-level timeout; a hung request stalls the
//! loop until the HTTP client's own timeout fires.

use shared::sync::{CycleOutcome, InventorySource, MetricSink, SyncEngine};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::state::CycleStatus;

/// Drives the synchronization engine on a fixed wait interval.
pub struct Scheduler {
    engine: SyncEngine,
    source: Arc<dyn InventorySource>,
    sink: Arc<dyn MetricSink>,
    status: Arc<CycleStatus>,
    wait: Duration,
}

impl Scheduler {
    /// Creates a new scheduler.
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine holding the published label state
    /// * `source` - Upstream check inventory
    /// * `sink` - Gauges to update
    /// * `status` - Where each cycle's outcome is recorded
    /// * `wait` - Pause between the end of one cycle and the start of the next
    #[must_use]
    pub fn new(
        engine: SyncEngine,
        source: Arc<dyn InventorySource>,
        sink: Arc<dyn MetricSink>,
        status: Arc<CycleStatus>,
        wait: Duration,
    ) -> Self {
        Self {
            engine,
            source,
            sink,
            status,
            wait,
        }
    }

    /// Runs a single cycle and records its outcome.
    pub async fn tick(&mut self) -> CycleOutcome {
        let outcome = self
            .engine
            .run_cycle(self.source.as_ref(), self.sink.as_ref())
            .await;
        self.status.record(outcome.clone());
        outcome
    }

    /// Starts the loop. The first cycle runs immediately.
    ///
    /// # Cancellation
    ///
    /// This function runs until its task is aborted. An in-flight cycle is
    /// dropped at its next await point; series it already updated keep their
    /// new values.
    pub async fn run(mut self) {
        tracing::info!(wait_secs = self.wait.as_secs(), "Scheduler started");
        loop {
            let outcome = self.tick().await;
            if outcome.healthy {
                tracing::debug!(checks = outcome.checks, "Pingdom poll succeeded");
            }
            tokio::time::sleep(self.wait).await;
        }
    }

    /// Spawns the loop on the current runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
