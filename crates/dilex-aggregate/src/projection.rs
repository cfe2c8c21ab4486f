//! Flattening of the normalized store into a chronological series.

use std::collections::BTreeMap;
use std::convert::Infallible;

use chrono::NaiveDate;
use dilex_types::{DateConstructionError, NormalizedStore, ProjectionEntry};
use tracing::warn;

/// Textual format entries are placed on the calendar with: `day monthName year`.
const DATE_FORMAT: &str = "%d %B %Y";

/// Places a (day, month name, year label) triple on the UTC calendar.
///
/// # Errors
///
/// Returns an error for an out-of-range day, an unrecognized month name, or
/// a year label that is not a number.
pub fn calendar_date(
    day: i32,
    month: &str,
    year: &str,
) -> Result<NaiveDate, DateConstructionError> {
    NaiveDate::parse_from_str(&format!("{day} {month} {year}"), DATE_FORMAT).map_err(|_| {
        DateConstructionError {
            day,
            month: month.to_string(),
            year: year.to_string(),
        }
    })
}

/// Builds the projection, skipping entries that cannot be dated.
///
/// Years are visited in ascending order, months in stored order, days in
/// stored order. Backlogged and invalid days are omitted and ranges collapse
/// to their truncated midpoint. When two entries land on the same date the
/// later-visited one wins. The result is ascending by date with no duplicates.
///
/// Each skipped entry is logged at `warn`. Tooling that must stop on the
/// first undatable entry uses [`try_build_projection`] instead.
#[must_use]
pub fn build_projection(store: &NormalizedStore) -> Vec<ProjectionEntry> {
    let mut series = BTreeMap::new();
    let Ok(()) = collect::<Infallible>(
        store,
        |error| {
            warn!(%error, "skipping undatable entry");
            Ok(())
        },
        &mut series,
    );
    into_entries(series)
}

/// Builds the projection, failing on the first entry that cannot be dated.
///
/// # Errors
///
/// Returns the first [`DateConstructionError`] encountered.
pub fn try_build_projection(
    store: &NormalizedStore,
) -> Result<Vec<ProjectionEntry>, DateConstructionError> {
    let mut series = BTreeMap::new();
    collect(store, Err, &mut series)?;
    Ok(into_entries(series))
}

fn collect<E>(
    store: &NormalizedStore,
    mut on_error: impl FnMut(DateConstructionError) -> Result<(), E>,
    series: &mut BTreeMap<NaiveDate, i64>,
) -> Result<(), E> {
    for (year, months) in store.iter() {
        for (month, days) in months.iter() {
            for entry in days {
                let Some(value) = entry.state.representative_value() else {
                    continue;
                };
                match calendar_date(entry.day, month, year) {
                    Ok(date) => {
                        series.insert(date, value);
                    }
                    Err(error) => on_error(error)?,
                }
            }
        }
    }
    Ok(())
}

fn into_entries(series: BTreeMap<NaiveDate, i64>) -> Vec<ProjectionEntry> {
    series
        .into_iter()
        .map(|(date, value)| ProjectionEntry::new(date, value))
        .collect()
}
