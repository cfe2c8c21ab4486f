//! Flattened, date-indexed projection entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of the chronological projection series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectionEntry {
    /// Calendar date (UTC).
    pub date: NaiveDate,
    /// Observed value, or the truncated midpoint of a reported range.
    pub value: i64,
}

impl ProjectionEntry {
    /// Creates a new projection entry.
    #[must_use]
    pub const fn new(date: NaiveDate, value: i64) -> Self {
        Self { date, value }
    }
}

/// Returns the most recent `n` entries of an ascending projection.
///
/// The returned slice keeps ascending order. Asking for more entries than
/// exist returns the whole projection.
#[must_use]
pub fn window(projection: &[ProjectionEntry], n: usize) -> &[ProjectionEntry] {
    &projection[projection.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: u32) -> Vec<ProjectionEntry> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        (0..len)
            .map(|i| ProjectionEntry::new(start + chrono::Days::new(u64::from(i)), i64::from(i)))
            .collect()
    }

    #[test]
    fn test_window_takes_last_entries() {
        let projection = series(30);
        let last_week = window(&projection, 7);

        assert_eq!(last_week.len(), 7);
        assert_eq!(last_week, &projection[23..]);
        assert!(last_week.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_window_larger_than_series() {
        let projection = series(3);
        assert_eq!(window(&projection, usize::MAX).len(), 3);
        assert!(window(&[], 7).is_empty());
    }
}
