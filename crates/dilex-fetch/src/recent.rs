//! Parsing of the recent export's year blocks.
//!
//! Each block is column-major: the first cell of a column is the month name
//! and every following cell is one day's reading. Cells reading `--` are
//! placeholders and are dropped before days are numbered, so a dropped cell
//! shifts the day number of every cell after it.

use dilex_types::{DayEntry, ExchangeState};

use crate::YearBlock;

/// Marker for a placeholder cell that produces no entry.
const PLACEHOLDER: &str = "--";

/// Marker for a day left unrecorded due to backlog.
const BACKLOG: &str = "Empty";

/// A parsed year block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentYear {
    /// Year label, e.g. `"2021"`.
    pub year: String,
    /// Months in column order with their days.
    pub months: Vec<(String, Vec<DayEntry>)>,
}

/// Extracts the year label from a block range.
///
/// The label is the first non-empty segment before an apostrophe, so both
/// `2019'...` and `'2019'!B4:M33` yield `"2019"`.
#[must_use]
pub fn year_label(range: &str) -> Option<&str> {
    range.split('\'').find(|segment| !segment.is_empty())
}

/// Interprets a single cell.
///
/// `Empty` anywhere marks a backlogged day, a cell without `-` is a single
/// value, and `low-high` is a band. Anything else is [`ExchangeState::InvalidData`].
#[must_use]
pub fn parse_cell(cell: &str) -> ExchangeState {
    if cell.contains(BACKLOG) {
        return ExchangeState::Backlogged;
    }

    if !cell.contains('-') {
        return cell
            .parse()
            .map_or(ExchangeState::InvalidData, ExchangeState::value);
    }

    let mut bounds = cell.split('-');
    match (bounds.next(), bounds.next(), bounds.next()) {
        (Some(low), Some(high), None) => match (low.parse(), high.parse()) {
            (Ok(low), Ok(high)) => ExchangeState::range(low, high),
            _ => ExchangeState::InvalidData,
        },
        _ => ExchangeState::InvalidData,
    }
}

/// Parses one column into its month name and day entries.
///
/// Returns `None` for columns holding only a header (or nothing at all).
#[must_use]
pub fn parse_column(column: &[String]) -> Option<(&str, Vec<DayEntry>)> {
    let (month, cells) = column.split_first()?;
    if cells.is_empty() {
        return None;
    }

    let days = cells
        .iter()
        .filter(|cell| !cell.contains(PLACEHOLDER))
        .zip(1..)
        .map(|(cell, day)| DayEntry::new(day, parse_cell(cell)))
        .collect();

    Some((month.as_str(), days))
}

/// Parses a year block.
///
/// Returns `None` if the block's range carries no year label. A month that
/// appears in more than one column keeps the last column's days.
#[must_use]
pub fn parse_block(block: &YearBlock) -> Option<RecentYear> {
    let year = year_label(&block.range)?;

    let mut months: Vec<(String, Vec<DayEntry>)> = Vec::new();
    for (month, days) in block.values.iter().filter_map(|column| parse_column(column)) {
        match months.iter_mut().find(|(name, _)| name == month) {
            Some(existing) => existing.1 = days,
            None => months.push((month.to_string(), days)),
        }
    }

    Some(RecentYear {
        year: year.to_string(),
        months,
    })
}
