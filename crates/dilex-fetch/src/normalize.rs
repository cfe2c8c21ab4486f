//! Mapping of both exports into the shared [`NormalizedStore`].

use dilex_types::{MonthTable, NormalizedStore};
use tracing::{debug, warn};

use crate::{
    DecodeError, LegacyResponse, RecentResponse, decode_legacy, decode_recent, legacy, recent,
};

/// Which export a body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Year blocks of month columns covering the most recent years.
    Recent,
    /// Flat chronological rows covering older years.
    Legacy,
}

impl SourceKind {
    /// Returns the source name used in logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Legacy => "legacy",
        }
    }

    /// Decodes a body of this kind and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match this source's shape.
    pub fn decode(self, body: &[u8]) -> Result<NormalizedStore, DecodeError> {
        match self {
            Self::Recent => decode_recent(body).map(|response| normalize_recent(&response)),
            Self::Legacy => decode_legacy(body).map(|response| normalize_legacy(&response)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds a store from the recent export.
///
/// A year repeated across blocks keeps the last block.
#[must_use]
pub fn normalize_recent(response: &RecentResponse) -> NormalizedStore {
    let mut store = NormalizedStore::new();

    for block in &response.value_ranges {
        let Some(parsed) = recent::parse_block(block) else {
            warn!(range = %block.range, "skipping year block without a year label");
            continue;
        };
        let months: MonthTable = parsed.months.into_iter().collect();
        if store.insert(parsed.year.clone(), months).is_some() {
            debug!(year = %parsed.year, "year block repeated; keeping the later one");
        }
    }

    store
}

/// Builds a store from the legacy export.
///
/// Entries are appended to their (year, month) in row order.
#[must_use]
pub fn normalize_legacy(response: &LegacyResponse) -> NormalizedStore {
    let mut store = NormalizedStore::new();
    let mut skipped = 0usize;

    for row in &response.values {
        match legacy::parse_row(row) {
            Some(parsed) => store
                .year_mut(parsed.year)
                .days_mut(parsed.month)
                .push(parsed.entry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped legacy rows without a usable date");
    }
    store
}
