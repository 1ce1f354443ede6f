//! Check-to-metric synchronization engine.
//!
//! This module keeps an upstream check inventory in exact correspondence with
//! a set of label-tagged gauges. The [`InventorySource`] and [`MetricSink`]
//! traits are the engine's only contact with the outside world.

pub mod cycle;
pub mod enrich;
pub mod labels;
pub mod sink;
pub mod source;
pub mod tracker;

pub use cycle::{CycleError, CycleOutcome, SyncEngine};
pub use enrich::{DetailEnricher, EnrichError, EnrichOutcome, EnrichedCheck};
pub use labels::{GeoLabels, LabelTuple, LABEL_NAMES};
pub use sink::{MetricSink, SinkOp};
pub use source::{InventorySource, SourceError};
pub use tracker::{LabelSetTracker, Observation};
