//! Display windows over the projection series.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{ProjectionEntry, window};

/// A trailing window of the projection, measured in entries (days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeRange {
    /// Last 7 entries.
    #[default]
    #[serde(rename = "1W")]
    Week,
    /// Last 30 entries.
    #[serde(rename = "1M")]
    Month,
    /// Last 90 entries.
    #[serde(rename = "3M")]
    Month3,
    /// Last 365 entries.
    #[serde(rename = "1Y")]
    Year,
    /// Last 1095 entries.
    #[serde(rename = "3Y")]
    Year3,
    /// The whole series.
    #[serde(rename = "All")]
    All,
}

impl TimeRange {
    /// Returns the number of entries kept by this window.
    #[must_use]
    pub const fn days(&self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Month3 => 90,
            Self::Year => 365,
            Self::Year3 => 365 * 3,
            Self::All => usize::MAX,
        }
    }

    /// Returns the short label for this window.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "1W",
            Self::Month => "1M",
            Self::Month3 => "3M",
            Self::Year => "1Y",
            Self::Year3 => "3Y",
            Self::All => "All",
        }
    }

    /// Returns all available windows, narrowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Week,
            Self::Month,
            Self::Month3,
            Self::Year,
            Self::Year3,
            Self::All,
        ]
    }

    /// Applies the window to an ascending projection.
    #[must_use]
    pub fn apply<'a>(&self, projection: &'a [ProjectionEntry]) -> &'a [ProjectionEntry] {
        window(projection, self.days())
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1w" | "week" => Ok(Self::Week),
            "1m" | "month" => Ok(Self::Month),
            "3m" => Ok(Self::Month3),
            "1y" | "year" => Ok(Self::Year),
            "3y" => Ok(Self::Year3),
            "all" => Ok(Self::All),
            _ => Err(TimeRangeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid time range string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRangeParseError(String);

impl std::fmt::Display for TimeRangeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid time range '{}', expected one of: 1W, 1M, 3M, 1Y, 3Y, All",
            self.0
        )
    }
}

impl std::error::Error for TimeRangeParseError {}
