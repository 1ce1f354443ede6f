//! In-memory test doubles for the synchronization engine.
//!
//! Compiled for this crate's tests and behind the `testing` feature for
//! other crates' dev-dependencies.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{Check, CheckId, CheckResult, Probe};
use crate::sync::{InventorySource, LabelTuple, MetricSink, SinkOp, SourceError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct Inventory {
    checks: Vec<Check>,
    probes: Vec<Probe>,
    results: HashMap<CheckId, CheckResult>,
    fail_checks: bool,
    fail_probes: bool,
    fail_results: HashSet<CheckId>,
}

/// A scripted inventory that can be changed between cycles.
#[derive(Debug, Default)]
pub struct InMemorySource {
    inventory: Mutex<Inventory>,
    check_calls: AtomicUsize,
    probe_calls: AtomicUsize,
    result_calls: AtomicUsize,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial checks.
    #[must_use]
    pub fn with_checks(self, checks: Vec<Check>) -> Self {
        self.set_checks(checks);
        self
    }

    /// Sets the initial probes.
    #[must_use]
    pub fn with_probes(self, probes: Vec<Probe>) -> Self {
        lock(&self.inventory).probes = probes;
        self
    }

    /// Registers the latest result of a check.
    #[must_use]
    pub fn with_result(self, check_id: CheckId, result: CheckResult) -> Self {
        lock(&self.inventory).results.insert(check_id, result);
        self
    }

    /// Replaces the checks returned from now on.
    pub fn set_checks(&self, checks: Vec<Check>) {
        lock(&self.inventory).checks = checks;
    }

    /// Makes `list_checks` fail until reset.
    pub fn fail_checks(&self, fail: bool) {
        lock(&self.inventory).fail_checks = fail;
    }

    /// Makes `list_probes` fail until reset.
    pub fn fail_probes(&self, fail: bool) {
        lock(&self.inventory).fail_probes = fail;
    }

    /// Makes `latest_result` fail for one check until reset.
    pub fn fail_result(&self, check_id: CheckId, fail: bool) {
        let mut inventory = lock(&self.inventory);
        if fail {
            inventory.fail_results.insert(check_id);
        } else {
            inventory.fail_results.remove(&check_id);
        }
    }

    /// Number of `list_checks` calls so far.
    #[must_use]
    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_probes` calls so far.
    #[must_use]
    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    /// Number of `latest_result` calls so far.
    #[must_use]
    pub fn result_calls(&self) -> usize {
        self.result_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for InMemorySource {
    async fn list_checks(&self, include_tags: bool) -> Result<Vec<Check>, SourceError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        let inventory = lock(&self.inventory);
        if inventory.fail_checks {
            return Err(SourceError::Transport("connection refused".to_string()));
        }
        let mut checks = inventory.checks.clone();
        if !include_tags {
            for check in &mut checks {
                check.tags.clear();
            }
        }
        Ok(checks)
    }

    async fn list_probes(&self) -> Result<Vec<Probe>, SourceError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        let inventory = lock(&self.inventory);
        if inventory.fail_probes {
            return Err(SourceError::Upstream {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(inventory.probes.clone())
    }

    async fn latest_result(&self, check_id: CheckId) -> Result<CheckResult, SourceError> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);
        let inventory = lock(&self.inventory);
        if inventory.fail_results.contains(&check_id) {
            return Err(SourceError::Transport("timed out".to_string()));
        }
        inventory
            .results
            .get(&check_id)
            .cloned()
            .ok_or(SourceError::NoResults(check_id))
    }
}

/// Values of one live series in a [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesValues {
    /// Status gauge value.
    pub status: f64,
    /// Response time gauge value.
    pub response_time: f64,
}

#[derive(Debug, Default)]
struct Recorded {
    up: Option<bool>,
    ops: Vec<SinkOp>,
    live: HashMap<LabelTuple, SeriesValues>,
}

/// A sink that records every call and mirrors the resulting live series.
#[derive(Debug, Default)]
pub struct RecordingSink {
    recorded: Mutex<Recorded>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last health value set, if any.
    #[must_use]
    pub fn up(&self) -> Option<bool> {
        lock(&self.recorded).up
    }

    /// Every evict/publish call in order.
    #[must_use]
    pub fn ops(&self) -> Vec<SinkOp> {
        lock(&self.recorded).ops.clone()
    }

    /// Removes and returns the recorded calls.
    pub fn take_ops(&self) -> Vec<SinkOp> {
        std::mem::take(&mut lock(&self.recorded).ops)
    }

    /// Currently live series.
    #[must_use]
    pub fn live(&self) -> HashMap<LabelTuple, SeriesValues> {
        lock(&self.recorded).live.clone()
    }

    /// Values of one live series.
    #[must_use]
    pub fn series(&self, labels: &LabelTuple) -> Option<SeriesValues> {
        lock(&self.recorded).live.get(labels).copied()
    }
}

impl MetricSink for RecordingSink {
    fn set_up(&self, up: bool) {
        lock(&self.recorded).up = Some(up);
    }

    fn evict(&self, labels: &LabelTuple) {
        let mut recorded = lock(&self.recorded);
        recorded.live.remove(labels);
        recorded.ops.push(SinkOp::Evict(labels.clone()));
    }

    fn publish(&self, labels: &LabelTuple, status: f64, response_time: f64) {
        let mut recorded = lock(&self.recorded);
        recorded.live.insert(
            labels.clone(),
            SeriesValues {
                status,
                response_time,
            },
        );
        recorded.ops.push(SinkOp::Publish {
            labels: labels.clone(),
            status,
            response_time,
        });
    }
}
