//! Integration tests for the Pingdom exporter.

mod common;
mod health_tests;
mod metrics_tests;
mod pingdom_tests;
