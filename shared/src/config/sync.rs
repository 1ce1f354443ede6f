//! Synchronization engine configuration.
//!
//! Holds the poll interval and the ordered list of tags whose checks get
//! enriched with probe details.

use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Default wait between two cycles, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Errors raised while validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Configuration consumed by the synchronization engine.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SyncConfig {
    /// Seconds to wait after a cycle finishes before starting the next one.
    #[validate(range(min = 1, max = 86_400, message = "Poll interval must be between 1s and 1 day"))]
    pub poll_interval_secs: u64,

    /// Tags selecting checks to enrich, in match priority order. Empty disables enrichment.
    pub detailed_tags: Vec<String>,
}

impl SyncConfig {
    /// Creates a configuration with the given interval and no enrichment.
    #[must_use]
    pub fn new(poll_interval_secs: u64) -> Self {
        Self {
            poll_interval_secs,
            detailed_tags: Vec::new(),
        }
    }

    /// Sets the enrichment tags from a comma separated list.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::config::SyncConfig;
    ///
    /// let config = SyncConfig::default().with_detailed_tags(" prod, ,eu,prod");
    /// assert_eq!(config.detailed_tags, vec!["prod", "eu"]);
    /// ```
    #[must_use]
    pub fn with_detailed_tags(mut self, raw: &str) -> Self {
        self.detailed_tags = parse_tag_list(raw);
        self
    }

    /// Returns the poll interval as a `Duration`.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Returns true if any enrichment tag is configured.
    #[must_use]
    pub fn enrichment_enabled(&self) -> bool {
        !self.detailed_tags.is_empty()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll interval is zero or longer than a day.
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        self.validate().map_err(ConfigError::from)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL_SECS)
    }
}

/// Splits a comma separated tag list.
///
/// Whitespace is trimmed, empty entries dropped, and duplicates removed keeping
/// the first occurrence so that match priority follows the input order.
#[must_use]
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
