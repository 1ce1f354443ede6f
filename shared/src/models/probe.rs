//! Probe and latest-result models used for check enrichment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A geographically located measurement agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    /// Probe identity.
    pub id: u64,
    /// Region code (e.g. "EU").
    pub region: String,
    /// ISO country code.
    pub country_iso: String,
    /// City name.
    pub city: String,
}

impl Probe {
    /// Creates a new probe.
    #[must_use]
    pub fn new(
        id: u64,
        region: impl Into<String>,
        country_iso: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            region: region.into(),
            country_iso: country_iso.into(),
            city: city.into(),
        }
    }
}

/// Probes keyed by identity for constant-time lookup during enrichment.
#[derive(Debug, Clone, Default)]
pub struct ProbeIndex {
    probes: HashMap<u64, Probe>,
}

impl ProbeIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a probe by identity.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Probe> {
        self.probes.get(&id)
    }

    /// Number of indexed probes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Returns true if no probes are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl FromIterator<Probe> for ProbeIndex {
    fn from_iter<I: IntoIterator<Item = Probe>>(iter: I) -> Self {
        Self {
            probes: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

/// The most recent single result of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Probe that produced the result.
    pub probe_id: u64,
    /// Raw status string.
    pub status: String,
    /// Response time in milliseconds.
    pub response_time: u64,
}
