//! Pingdom Exporter Shared Library
//!
//! This crate contains the check model and the synchronization engine that
//! turns an upstream check inventory into a bounded set of gauge series.
//!
//! # Modules
//!
//! - [`models`] - Checks, probes, results and status codes
//! - [`sync`] - Enrichment, label tracking and the synchronization cycle
//! - [`config`] - Engine configuration
//!
//! # Example
//!
//! ```
//! use shared::models::{Check, CheckId};
//! use shared::sync::{GeoLabels, LabelTuple};
//!
//! let check = Check::new(CheckId(1), "Homepage", "example.com").with_status("down");
//! let labels = LabelTuple::for_check(&check, &GeoLabels::default());
//!
//! assert_eq!(labels.name, "Homepage");
//! assert!((check.status_value() - 2.0).abs() < f64::EPSILON);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod models;
pub mod sync;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export common dependencies for convenience.
pub use async_trait::async_trait;
pub use chrono;
