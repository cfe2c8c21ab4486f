//! Parsing of the legacy export's `[M/D/YYYY, value]` rows.

use dilex_types::{DayEntry, ExchangeState};

/// A parsed legacy row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRow<'a> {
    /// Year label, taken verbatim from the date.
    pub year: &'a str,
    /// English month name.
    pub month: &'static str,
    /// Day number and reading.
    pub entry: DayEntry,
}

/// Maps a month token to its English name.
///
/// The token is matched literally against `"1"` to `"11"`; every other token,
/// including `"12"`, `"13"` and zero-padded forms, maps to `"December"`.
#[must_use]
pub fn month_name(token: &str) -> &'static str {
    match token {
        "1" => "January",
        "2" => "February",
        "3" => "March",
        "4" => "April",
        "5" => "May",
        "6" => "June",
        "7" => "July",
        "8" => "August",
        "9" => "September",
        "10" => "October",
        "11" => "November",
        _ => "December",
    }
}

/// Parses one row.
///
/// Returns `None` if the date does not have exactly three `/`-separated parts
/// or the day part is not an integer. Out-of-range days such as `-1` or `40`
/// are kept. An unparseable or missing value yields
/// [`ExchangeState::InvalidData`].
#[must_use]
pub fn parse_row(row: &[String]) -> Option<LegacyRow<'_>> {
    let date = row.first()?;
    let parts: Vec<&str> = date.split('/').filter(|part| !part.is_empty()).collect();
    let &[month, day, year] = parts.as_slice() else {
        return None;
    };
    let day: i32 = day.parse().ok()?;

    let state = row
        .get(1)
        .and_then(|value| value.parse().ok())
        .map_or(ExchangeState::InvalidData, ExchangeState::value);

    Some(LegacyRow {
        year,
        month: month_name(month),
        entry: DayEntry::new(day, state),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_row() {
        let cells = row(&["3/15/2020", "442"]);
        let parsed = parse_row(&cells).unwrap();

        assert_eq!(parsed.year, "2020");
        assert_eq!(parsed.month, "March");
        assert_eq!(parsed.entry, DayEntry::new(15, ExchangeState::value(442)));
    }

    #[test]
    fn test_out_of_table_month_defaults_to_december() {
        let cells = row(&["13/1/2020", "100"]);
        let parsed = parse_row(&cells).unwrap();

        assert_eq!(parsed.month, "December");
        assert_eq!(parsed.entry, DayEntry::new(1, ExchangeState::value(100)));
    }

    #[test]
    fn test_month_tokens_match_literally() {
        assert_eq!(month_name("11"), "November");
        assert_eq!(month_name("12"), "December");
        assert_eq!(month_name("03"), "December");
    }

    #[test]
    fn test_invalid_value() {
        let cells = row(&["1/2/2018", "#N/A"]);
        assert_eq!(parse_row(&cells).unwrap().entry.state, ExchangeState::InvalidData);

        let cells = row(&["1/3/2018"]);
        assert_eq!(parse_row(&cells).unwrap().entry.state, ExchangeState::InvalidData);
    }

    #[test]
    fn test_signed_day_is_kept() {
        let cells = row(&["3/-1/2020", "442"]);
        let parsed = parse_row(&cells).unwrap();

        assert_eq!(parsed.month, "March");
        assert_eq!(parsed.entry, DayEntry::new(-1, ExchangeState::value(442)));
    }

    #[test]
    fn test_skipped_rows() {
        assert!(parse_row(&row(&["2020-03-15", "442"])).is_none());
        assert!(parse_row(&row(&["3/15", "442"])).is_none());
        assert!(parse_row(&row(&["3/x/2020", "442"])).is_none());
        assert!(parse_row(&row(&["3/15/2020/1", "442"])).is_none());
        assert!(parse_row(&[]).is_none());
    }
}
