//! Per-day exchange readings.

use serde::{Deserialize, Serialize};

/// A single day's market reading as published by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExchangeState {
    /// The source cell could not be interpreted as a number or a range.
    InvalidData,
    /// The source marks the day as unrecorded due to a processing backlog.
    Backlogged,
    /// A single observed value.
    Value {
        /// Observed value.
        value: i64,
    },
    /// A reported low/high band. Always `low <= high`.
    Range {
        /// Lower bound of the band.
        low: i64,
        /// Upper bound of the band.
        high: i64,
    },
}

impl ExchangeState {
    /// Creates a single-value state.
    #[must_use]
    pub const fn value(value: i64) -> Self {
        Self::Value { value }
    }

    /// Creates a range state, or `InvalidData` if `low > high`.
    #[must_use]
    pub const fn range(low: i64, high: i64) -> Self {
        if low <= high {
            Self::Range { low, high }
        } else {
            Self::InvalidData
        }
    }

    /// Returns the value used when plotting this day.
    ///
    /// Ranges collapse to their midpoint, truncated toward zero. Days without
    /// a determinable value return `None`.
    #[must_use]
    pub const fn representative_value(&self) -> Option<i64> {
        match *self {
            Self::Value { value } => Some(value),
            Self::Range { low, high } => Some(midpoint(low, high)),
            Self::InvalidData | Self::Backlogged => None,
        }
    }

    /// Returns true if the state carries a value or a range.
    #[must_use]
    pub const fn is_determinable(&self) -> bool {
        matches!(self, Self::Value { .. } | Self::Range { .. })
    }
}

/// Integer midpoint of a band, truncated toward zero.
///
/// Widened to 128 bits so that the sum cannot overflow.
#[must_use]
pub const fn midpoint(low: i64, high: i64) -> i64 {
    ((low as i128 + high as i128) / 2) as i64
}

/// One day's reading within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayEntry {
    /// Day of the month as assigned by the parser.
    ///
    /// Nominally 1-31, but any integer the source carries is kept; days that
    /// do not exist on the calendar are dropped when projecting.
    pub day: i32,
    /// The reading for that day.
    pub state: ExchangeState,
}

impl DayEntry {
    /// Creates a new day entry.
    #[must_use]
    pub const fn new(day: i32, state: ExchangeState) -> Self {
        Self { day, state }
    }
}
