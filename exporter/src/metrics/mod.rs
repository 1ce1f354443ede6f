//! Prometheus exposition of the synchronized check gauges.

pub mod sink;

pub use sink::{PrometheusSink, SinkError};
