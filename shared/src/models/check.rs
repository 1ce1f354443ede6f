//! Check data model.
//!
//! A `Check` is one monitored target as reported by the upstream inventory.
//! Checks are rebuilt from scratch on every synchronization cycle and never
//! mutated in place across cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::CheckStatus;

/// Stable identity of a check across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub u64);

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CheckId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A monitored check.
///
/// # Example
///
/// ```
/// use shared::models::{Check, CheckId};
///
/// let check = Check::new(CheckId(42), "Homepage", "example.com")
///     .with_status("up")
///     .with_response_time(120)
///     .with_tag("production");
///
/// assert_eq!(check.tags_joined(), "production");
/// assert!(!check.is_paused());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Check identity.
    pub id: CheckId,
    /// Display name.
    pub name: String,
    /// Target host.
    pub hostname: String,
    /// Polling resolution in minutes.
    pub resolution: u32,
    /// Paused flag as reported upstream. Not reliable on its own, see [`Check::is_paused`].
    #[serde(default)]
    pub paused: bool,
    /// Raw upstream status string.
    pub status: String,
    /// Last observed response time in milliseconds.
    #[serde(default)]
    pub last_response_time: u64,
    /// Tag names in upstream order.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Check {
    /// Creates a check with status `unknown`, resolution 1 and no tags.
    #[must_use]
    pub fn new(id: CheckId, name: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hostname: hostname.into(),
            resolution: 1,
            paused: false,
            status: CheckStatus::Unknown.as_str().to_string(),
            last_response_time: 0,
            tags: Vec::new(),
        }
    }

    /// Sets the raw status string.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the polling resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the upstream paused flag.
    #[must_use]
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Sets the last response time in milliseconds.
    #[must_use]
    pub fn with_response_time(mut self, millis: u64) -> Self {
        self.last_response_time = millis;
        self
    }

    /// Appends a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Returns whether the check is paused.
    ///
    /// The upstream flag is overridden to `true` whenever the raw status is `paused`.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused || CheckStatus::from_raw(&self.status) == CheckStatus::Paused
    }

    /// Returns the gauge value for the current raw status.
    #[must_use]
    pub fn status_value(&self) -> f64 {
        CheckStatus::from_raw(&self.status).gauge_value()
    }

    /// Returns the tag names joined with `,`.
    #[must_use]
    pub fn tags_joined(&self) -> String {
        self.tags.join(",")
    }
}
