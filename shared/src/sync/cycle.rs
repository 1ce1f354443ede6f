//! The synchronization cycle.
//!
//! One cycle fetches the inventory, enriches interesting checks, reconciles
//! label tuples and applies the resulting evictions and publishes to a sink.
//! If the inventory (or, with enrichment enabled, the probe list) cannot be
//! fetched, only the health gauge is touched and every series keeps its
//! last published value.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::enrich::{DetailEnricher, EnrichOutcome, EnrichedCheck};
use super::labels::LabelTuple;
use super::sink::MetricSink;
use super::source::{InventorySource, SourceError};
use super::tracker::{LabelSetTracker, Observation};
use crate::config::SyncConfig;
use crate::models::ProbeIndex;

/// Failures that abort a whole cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The probe list could not be fetched.
    #[error("Error getting probes: {0}")]
    Probes(#[source] SourceError),

    /// The check list could not be fetched.
    #[error("Error getting checks: {0}")]
    Checks(#[source] SourceError),
}

/// Summary of one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    /// Whether the upstream inventory was reachable.
    pub healthy: bool,
    /// When the cycle finished.
    pub finished_at: DateTime<Utc>,
    /// Checks seen this cycle.
    pub checks: usize,
    /// Series published.
    pub published: usize,
    /// Series evicted.
    pub evicted: usize,
    /// Checks enriched from their latest result.
    pub enriched: usize,
    /// Checks whose enrichment fell back to list values.
    pub enrichment_failures: usize,
    /// Cycle-fatal error, if any.
    pub error: Option<String>,
}

impl CycleOutcome {
    fn failed(error: &CycleError) -> Self {
        Self {
            healthy: false,
            finished_at: Utc::now(),
            checks: 0,
            published: 0,
            evicted: 0,
            enriched: 0,
            enrichment_failures: 0,
            error: Some(error.to_string()),
        }
    }
}

/// Runs synchronization cycles against a source and a sink.
///
/// The engine owns the published label state, so a single engine must drive
/// every cycle for a given sink.
#[derive(Debug, Default)]
pub struct SyncEngine {
    enricher: DetailEnricher,
    tracker: LabelSetTracker,
}

impl SyncEngine {
    /// Creates an engine with nothing published yet.
    #[must_use]
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            enricher: DetailEnricher::new(config.detailed_tags.clone()),
            tracker: LabelSetTracker::new(),
        }
    }

    /// Returns the label tracker.
    #[must_use]
    pub fn tracker(&self) -> &LabelSetTracker {
        &self.tracker
    }

    /// Runs one cycle and applies its effects to `sink`.
    ///
    /// Cycle-fatal errors are logged and reported in the outcome; they set the
    /// health gauge to 0 and leave every published series untouched.
    pub async fn run_cycle(
        &mut self,
        source: &dyn InventorySource,
        sink: &dyn MetricSink,
    ) -> CycleOutcome {
        let probes = if self.enricher.is_enabled() {
            match source.list_probes().await {
                Ok(probes) => probes.into_iter().collect(),
                Err(e) => return Self::abort(sink, &CycleError::Probes(e)),
            }
        } else {
            ProbeIndex::new()
        };

        let checks = match source.list_checks(true).await {
            Ok(checks) => checks,
            Err(e) => return Self::abort(sink, &CycleError::Checks(e)),
        };
        sink.set_up(true);

        let mut outcome = CycleOutcome {
            healthy: true,
            finished_at: Utc::now(),
            checks: checks.len(),
            published: 0,
            evicted: 0,
            enriched: 0,
            enrichment_failures: 0,
            error: None,
        };

        let mut observations = Vec::with_capacity(checks.len());
        for check in checks {
            let enriched = self.enricher.enrich(source, &probes, check).await;
            match enriched.outcome {
                EnrichOutcome::Enriched => outcome.enriched += 1,
                EnrichOutcome::FellBack => outcome.enrichment_failures += 1,
                EnrichOutcome::Skipped => {}
            }
            observations.push(observe(&enriched));
        }

        for op in self.tracker.reconcile(observations) {
            if op.is_evict() {
                outcome.evicted += 1;
            } else {
                outcome.published += 1;
            }
            op.apply(sink);
        }

        outcome.finished_at = Utc::now();
        tracing::debug!(
            checks = outcome.checks,
            published = outcome.published,
            evicted = outcome.evicted,
            enriched = outcome.enriched,
            enrichment_failures = outcome.enrichment_failures,
            "Synchronization cycle complete"
        );
        outcome
    }

    fn abort(sink: &dyn MetricSink, error: &CycleError) -> CycleOutcome {
        sink.set_up(false);
        tracing::error!(error = %error, "Synchronization cycle failed");
        CycleOutcome::failed(error)
    }
}

#[allow(clippy::cast_precision_loss)]
fn observe(enriched: &EnrichedCheck) -> Observation {
    Observation {
        id: enriched.check.id,
        labels: LabelTuple::for_check(&enriched.check, &enriched.geo),
        status: enriched.check.status_value(),
        response_time: enriched.check.last_response_time as f64,
    }
}
