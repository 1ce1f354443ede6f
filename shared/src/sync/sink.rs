//! Metric sink capability and the operations the tracker emits for it.

use super::labels::LabelTuple;

/// Write-only gauge storage driven by the engine.
///
/// Each call must be atomic with respect to concurrent scrapes. The engine
/// never reads back from the sink.
pub trait MetricSink: Send + Sync {
    /// Sets the upstream health gauge.
    fn set_up(&self, up: bool);

    /// Removes the status and response time series for `labels`.
    ///
    /// Must be a no-op if the series does not exist.
    fn evict(&self, labels: &LabelTuple);

    /// Upserts the status and response time series for `labels`.
    fn publish(&self, labels: &LabelTuple, status: f64, response_time: f64);
}

/// A single instruction for a [`MetricSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    /// Remove a stale series.
    Evict(LabelTuple),
    /// Publish current values under a series.
    Publish {
        /// Series labels.
        labels: LabelTuple,
        /// Status gauge value.
        status: f64,
        /// Response time gauge value, milliseconds.
        response_time: f64,
    },
}

impl SinkOp {
    /// Applies the operation to a sink.
    pub fn apply(&self, sink: &dyn MetricSink) {
        match self {
            Self::Evict(labels) => sink.evict(labels),
            Self::Publish {
                labels,
                status,
                response_time,
            } => sink.publish(labels, *status, *response_time),
        }
    }

    /// Returns the labels the operation targets.
    #[must_use]
    pub fn labels(&self) -> &LabelTuple {
        match self {
            Self::Evict(labels) | Self::Publish { labels, .. } => labels,
        }
    }

    /// Returns true for evictions.
    #[must_use]
    pub fn is_evict(&self) -> bool {
        matches!(self, Self::Evict(_))
    }
}
