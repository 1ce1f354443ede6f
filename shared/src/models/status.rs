//! Check status codes and their gauge values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known upstream check statuses.
///
/// Raw strings are matched exactly and case-sensitively. Anything else is
/// [`CheckStatus::Unrecognized`], which publishes a sentinel value that does
/// not collide with the real codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// No result yet.
    Unknown,
    /// Monitoring is paused.
    Paused,
    /// Target is up.
    Up,
    /// Target failed once and is being re-tested.
    UnconfirmedDown,
    /// Target is down.
    Down,
    /// Any status string not listed above.
    Unrecognized,
}

impl CheckStatus {
    /// Gauge value published for unrecognized statuses.
    pub const UNRECOGNIZED_VALUE: f64 = 100.0;

    /// Maps a raw upstream status string.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::models::CheckStatus;
    ///
    /// assert_eq!(CheckStatus::from_raw("up"), CheckStatus::Up);
    /// assert_eq!(CheckStatus::from_raw("UP"), CheckStatus::Unrecognized);
    /// ```
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "unknown" => Self::Unknown,
            "paused" => Self::Paused,
            "up" => Self::Up,
            "unconfirmed_down" => Self::UnconfirmedDown,
            "down" => Self::Down,
            _ => Self::Unrecognized,
        }
    }

    /// Returns the value published on the status gauge.
    #[must_use]
    pub fn gauge_value(self) -> f64 {
        match self {
            Self::Unknown => -2.0,
            Self::Paused => -1.0,
            Self::Up => 0.0,
            Self::UnconfirmedDown => 1.0,
            Self::Down => 2.0,
            Self::Unrecognized => Self::UNRECOGNIZED_VALUE,
        }
    }

    /// Returns the canonical upstream string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Paused => "paused",
            Self::Up => "up",
            Self::UnconfirmedDown => "unconfirmed_down",
            Self::Down => "down",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw status string straight to its gauge value.
#[must_use]
pub fn status_value(raw: &str) -> f64 {
    CheckStatus::from_raw(raw).gauge_value()
}
