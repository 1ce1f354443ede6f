//! Prometheus-backed metric sink.
//!
//! Owns a dedicated registry holding the upstream health gauge and the two
//! per-check gauge families. Every series update is a single call into the
//! `prometheus` crate, so concurrent scrapes never see a half-written series.

use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use shared::sync::{LabelTuple, MetricSink, LABEL_NAMES};
use thiserror::Error;

/// Errors raised while building or encoding the registry.
#[derive(Debug, Error)]
pub enum SinkError {
    /// A collector could not be created or registered.
    #[error("Failed to register metric: {0}")]
    Registry(#[source] prometheus::Error),

    /// The registry could not be encoded.
    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}

/// Gauges exposed on `/metrics`.
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    up: Gauge,
    check_status: GaugeVec,
    check_response_time: GaugeVec,
}

impl PrometheusSink {
    /// Creates the gauges and registers them in a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a gauge cannot be created or registered.
    pub fn new() -> Result<Self, SinkError> {
        let registry = Registry::new();

        let up = Gauge::new(
            "pingdom_up",
            "Whether the last pingdom scrape was successfull (1: up, 0: down)",
        )
        .map_err(SinkError::Registry)?;

        let check_status = GaugeVec::new(
            Opts::new(
                "pingdom_check_status",
                "The current status of the check (0: up, 1: unconfirmed_down, 2: down, -1: paused, -2: unknown)",
            ),
            &LABEL_NAMES,
        )
        .map_err(SinkError::Registry)?;

        let check_response_time = GaugeVec::new(
            Opts::new(
                "pingdom_check_response_time",
                "The response time of last test in milliseconds",
            ),
            &LABEL_NAMES,
        )
        .map_err(SinkError::Registry)?;

        registry
            .register(Box::new(up.clone()))
            .map_err(SinkError::Registry)?;
        registry
            .register(Box::new(check_status.clone()))
            .map_err(SinkError::Registry)?;
        registry
            .register(Box::new(check_response_time.clone()))
            .map_err(SinkError::Registry)?;

        Ok(Self {
            registry,
            up,
            check_status,
            check_response_time,
        })
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes every registered metric in the Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> Result<String, SinkError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| SinkError::Encode(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| SinkError::Encode(e.to_string()))
    }

    /// Content type of [`PrometheusSink::render`] output.
    #[must_use]
    pub fn content_type() -> &'static str {
        prometheus::TEXT_FORMAT
    }
}

impl MetricSink for PrometheusSink {
    fn set_up(&self, up: bool) {
        self.up.set(if up { 1.0 } else { 0.0 });
    }

    fn evict(&self, labels: &LabelTuple) {
        let values = labels.values();
        // Missing series are not an error here.
        let _ = self.check_status.remove_label_values(&values);
        let _ = self.check_response_time.remove_label_values(&values);
    }

    fn publish(&self, labels: &LabelTuple, status: f64, response_time: f64) {
        let values = labels.values();
        match (
            self.check_status.get_metric_with_label_values(&values),
            self.check_response_time.get_metric_with_label_values(&values),
        ) {
            (Ok(status_gauge), Ok(time_gauge)) => {
                status_gauge.set(status);
                time_gauge.set(response_time);
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(check_id = %labels.id, error = %e, "Failed to publish check series");
            }
        }
    }
}
