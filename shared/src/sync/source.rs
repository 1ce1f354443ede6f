//! Upstream inventory capability.
//!
//! The engine never talks HTTP itself; it drives an `InventorySource`.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Check, CheckId, CheckResult, Probe};

/// Errors returned by an inventory source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream answered with an error status.
    #[error("Upstream returned {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Upstream error description.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    /// The check has no recorded results.
    #[error("No results found for check {0}")]
    NoResults(CheckId),
}

/// Supplies the current check inventory.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Lists every check.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be fetched.
    async fn list_checks(&self, include_tags: bool) -> Result<Vec<Check>, SourceError>;

    /// Lists every probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe list cannot be fetched.
    async fn list_probes(&self) -> Result<Vec<Probe>, SourceError>;

    /// Returns the most recent result of a check.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NoResults`] if the check has none, or any other
    /// variant if the lookup fails.
    async fn latest_result(&self, check_id: CheckId) -> Result<CheckResult, SourceError>;
}
