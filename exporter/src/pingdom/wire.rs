//! Pingdom REST API response bodies.
//!
//! Only the fields the exporter reads are declared; everything else in the
//! payloads is ignored.

use serde::Deserialize;
use shared::models::{Check, CheckId, CheckResult, Probe};

#[derive(Debug, Deserialize)]
pub(crate) struct ChecksEnvelope {
    #[serde(default)]
    pub checks: Vec<WireCheck>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCheck {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub resolution: u32,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub lastresponsetime: i64,
    #[serde(default)]
    pub tags: Vec<WireTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireTag {
    pub name: String,
}

impl From<WireCheck> for Check {
    fn from(wire: WireCheck) -> Self {
        Self {
            id: CheckId(wire.id),
            name: wire.name,
            hostname: wire.hostname,
            resolution: wire.resolution,
            paused: wire.paused,
            status: wire.status,
            last_response_time: non_negative(wire.lastresponsetime),
            tags: wire.tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProbesEnvelope {
    #[serde(default)]
    pub probes: Vec<WireProbe>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireProbe {
    pub id: u64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub countryiso: String,
    #[serde(default)]
    pub city: String,
}

impl From<WireProbe> for Probe {
    fn from(wire: WireProbe) -> Self {
        Self::new(wire.id, wire.region, wire.countryiso, wire.city)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsEnvelope {
    #[serde(default)]
    pub results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResult {
    pub probeid: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub responsetime: i64,
}

impl From<WireResult> for CheckResult {
    fn from(wire: WireResult) -> Self {
        Self {
            probe_id: wire.probeid,
            status: wire.status,
            response_time: non_negative(wire.responsetime),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: WireError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    #[serde(default)]
    pub statusdesc: String,
    #[serde(default)]
    pub errormessage: String,
}

impl WireError {
    pub fn message(&self) -> String {
        match (self.statusdesc.is_empty(), self.errormessage.is_empty()) {
            (_, true) => self.statusdesc.clone(),
            (true, false) => self.errormessage.clone(),
            (false, false) => format!("{}: {}", self.statusdesc, self.errormessage),
        }
    }
}

fn non_negative(millis: i64) -> u64 {
    u64::try_from(millis).unwrap_or(0)
}
