//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers and
//! the scheduler.

use shared::sync::CycleOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::metrics::{PrometheusSink, SinkError};

/// Outcome of the most recent synchronization cycle.
#[derive(Debug, Default)]
pub struct CycleStatus {
    last: RwLock<Option<CycleOutcome>>,
    cycles: AtomicU64,
}

impl CycleStatus {
    /// Creates an empty status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished cycle.
    pub fn record(&self, outcome: CycleOutcome) {
        *self.last.write().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the last recorded cycle, if any.
    #[must_use]
    pub fn last(&self) -> Option<CycleOutcome> {
        self.last
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of cycles recorded since startup.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The Prometheus gauges.
    sink: Arc<PrometheusSink>,
    /// Last cycle outcome.
    status: Arc<CycleStatus>,
}

impl AppState {
    /// Creates a new application state with the given sink and status.
    pub fn new(sink: Arc<PrometheusSink>, status: Arc<CycleStatus>) -> Self {
        Self { sink, status }
    }

    /// Creates a new application state with a fresh registry and no cycles.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauges cannot be registered.
    pub fn with_fresh_registry() -> Result<Self, SinkError> {
        Ok(Self::new(
            Arc::new(PrometheusSink::new()?),
            Arc::new(CycleStatus::new()),
        ))
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &Arc<PrometheusSink> {
        &self.sink
    }

    /// Returns the cycle status.
    #[must_use]
    pub fn status(&self) -> &Arc<CycleStatus> {
        &self.status
    }
}
