//! Label set tracking.
//!
//! Keeps the label tuple last published for every check and turns each
//! cycle's observations into an ordered list of [`SinkOp`]s. For a single
//! check the eviction of a stale tuple always precedes the publish of its
//! replacement, so no check is ever left with two live series once a cycle
//! completes. Checks that vanish from the inventory are evicted without
//! replacement.

use std::collections::HashMap;

use super::labels::LabelTuple;
use super::sink::SinkOp;
use crate::models::CheckId;

/// What a cycle observed for one check.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Check identity.
    pub id: CheckId,
    /// Label tuple computed for this cycle.
    pub labels: LabelTuple,
    /// Status gauge value.
    pub status: f64,
    /// Response time gauge value, milliseconds.
    pub response_time: f64,
}

/// Owns the published state and diffs it against each cycle.
#[derive(Debug, Default)]
pub struct LabelSetTracker {
    published: HashMap<CheckId, LabelTuple>,
}

impl LabelSetTracker {
    /// Creates a tracker with nothing published.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles a complete cycle of observations against the published state.
    ///
    /// The published state is replaced by the identities observed in this
    /// cycle. Evictions of removed checks come last, ordered by identity.
    pub fn reconcile<I>(&mut self, observations: I) -> Vec<SinkOp>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut ops = Vec::new();
        let mut next: HashMap<CheckId, LabelTuple> = HashMap::with_capacity(self.published.len());

        for obs in observations {
            // A repeated identity within one cycle supersedes its earlier entry.
            let stale = next
                .remove(&obs.id)
                .or_else(|| self.published.remove(&obs.id));
            if let Some(old) = stale {
                if old != obs.labels {
                    ops.push(SinkOp::Evict(old));
                }
            }

            ops.push(SinkOp::Publish {
                labels: obs.labels.clone(),
                status: obs.status,
                response_time: obs.response_time,
            });
            next.insert(obs.id, obs.labels);
        }

        let mut removed: Vec<(CheckId, LabelTuple)> = self.published.drain().collect();
        removed.sort_by_key(|(id, _)| *id);
        for (id, labels) in removed {
            tracing::debug!(check_id = %id, "Evicting series of removed check");
            ops.push(SinkOp::Evict(labels));
        }

        self.published = next;
        ops
    }

    /// Returns the tuple currently published for a check.
    #[must_use]
    pub fn published(&self, id: CheckId) -> Option<&LabelTuple> {
        self.published.get(&id)
    }

    /// Number of checks with a published tuple.
    #[must_use]
    pub fn len(&self) -> usize {
        self.published.len()
    }

    /// Returns true if nothing is published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.published.is_empty()
    }
}
