//! Detail enrichment of checks carrying an interest tag.
//!
//! A matching check gets its most recent result fetched; the result's status
//! and response time override the list values and its probe supplies the
//! geographic labels. Any failure falls back to the check's own values with
//! empty geographic labels and never aborts the cycle.

use thiserror::Error;

use super::labels::GeoLabels;
use super::source::{InventorySource, SourceError};
use crate::models::{Check, CheckId, ProbeIndex};

/// Reasons an enrichment falls back to the unenriched check.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The latest result lookup failed or returned nothing.
    #[error("Failed to get check {check_id} details: {source}")]
    Source {
        /// Check being enriched.
        check_id: CheckId,
        /// Underlying source error.
        #[source]
        source: SourceError,
    },

    /// The latest result references a probe that is not in the probe list.
    #[error("Probe {probe_id} for check {check_id} not found")]
    UnknownProbe {
        /// Probe referenced by the result.
        probe_id: u64,
        /// Check being enriched.
        check_id: CheckId,
    },
}

/// How a check left the enricher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// No interest tag matched.
    Skipped,
    /// Status, latency and location came from the latest result.
    Enriched,
    /// An interest tag matched but the lookup failed.
    FellBack,
}

/// A check ready for label computation.
#[derive(Debug, Clone)]
pub struct EnrichedCheck {
    /// The check, with status and latency possibly overridden.
    pub check: Check,
    /// Geographic labels, empty unless enriched.
    pub geo: GeoLabels,
    /// What happened during enrichment.
    pub outcome: EnrichOutcome,
}

/// Enriches checks whose tags intersect an ordered interest list.
#[derive(Debug, Clone, Default)]
pub struct DetailEnricher {
    interest_tags: Vec<String>,
}

impl DetailEnricher {
    /// Creates an enricher. An empty list disables enrichment.
    #[must_use]
    pub fn new(interest_tags: Vec<String>) -> Self {
        Self { interest_tags }
    }

    /// Returns true if any interest tag is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.interest_tags.is_empty()
    }

    /// Returns the first tag of `check`, in the check's own order, that is an interest tag.
    #[must_use]
    pub fn matching_tag<'a>(&self, check: &'a Check) -> Option<&'a str> {
        check
            .tags
            .iter()
            .find(|tag| self.interest_tags.iter().any(|t| t == *tag))
            .map(String::as_str)
    }

    /// Enriches a check, falling back to its own values on failure.
    pub async fn enrich(
        &self,
        source: &dyn InventorySource,
        probes: &ProbeIndex,
        check: Check,
    ) -> EnrichedCheck {
        let Some(tag) = self.matching_tag(&check) else {
            return EnrichedCheck {
                check,
                geo: GeoLabels::default(),
                outcome: EnrichOutcome::Skipped,
            };
        };
        tracing::trace!(check_id = %check.id, tag, "Enriching check");

        match self.lookup(source, probes, check.id).await {
            Ok((status, response_time, geo)) => EnrichedCheck {
                check: Check {
                    status,
                    last_response_time: response_time,
                    ..check
                },
                geo,
                outcome: EnrichOutcome::Enriched,
            },
            Err(e) => {
                tracing::warn!(check_id = %check.id, error = %e, "Falling back to unenriched check");
                EnrichedCheck {
                    check,
                    geo: GeoLabels::default(),
                    outcome: EnrichOutcome::FellBack,
                }
            }
        }
    }

    async fn lookup(
        &self,
        source: &dyn InventorySource,
        probes: &ProbeIndex,
        check_id: CheckId,
    ) -> Result<(String, u64, GeoLabels), EnrichError> {
        let result = source
            .latest_result(check_id)
            .await
            .map_err(|source| EnrichError::Source { check_id, source })?;

        let probe = probes
            .get(result.probe_id)
            .ok_or(EnrichError::UnknownProbe {
                probe_id: result.probe_id,
                check_id,
            })?;

        Ok((result.status, result.response_time, GeoLabels::from(probe)))
    }
}
