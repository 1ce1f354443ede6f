//! Data models for the Pingdom exporter.
//!
//! This module contains the check inventory as seen by the synchronization engine.

pub mod check;
pub mod probe;
pub mod status;

pub use check::{Check, CheckId};
pub use probe::{CheckResult, Probe, ProbeIndex};
pub use status::{status_value, CheckStatus};
