//! Google Sheets endpoint construction.

/// Base URL for the Sheets v4 values API.
pub const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Spreadsheet holding the recent (year-block) export.
pub const RECENT_SPREADSHEET_ID: &str = "1d8en4AFHupjRkwldCRICiQJVIIkJCJqjKTCwBh7GweY";

/// Sheet ranges of the recent export, one per year.
pub const RECENT_RANGES: &[&str] = &["2019!B4:M33", "2020!B2:M33", "2021!B2:M33"];

/// Spreadsheet holding the legacy (flat row) export.
pub const LEGACY_SPREADSHEET_ID: &str = "1u82v-JbO0vyFXsEw2eORD0RY5tRov7lXgzEuvCKxo9s";

/// Sheet range of the legacy export.
pub const LEGACY_RANGE: &str = "Exchange Log!A7:B1782";

/// Locations of both exports plus the shared access credential.
#[derive(Clone, PartialEq, Eq)]
pub struct SheetsEndpoints {
    /// API key appended to every request.
    pub api_key: String,
    /// Spreadsheet id of the recent export.
    pub recent_spreadsheet_id: String,
    /// Ranges requested from the recent export (column-major).
    pub recent_ranges: Vec<String>,
    /// Spreadsheet id of the legacy export.
    pub legacy_spreadsheet_id: String,
    /// Range requested from the legacy export.
    pub legacy_range: String,
}

impl SheetsEndpoints {
    /// Creates endpoints for the published spreadsheets with the given key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            recent_spreadsheet_id: RECENT_SPREADSHEET_ID.to_string(),
            recent_ranges: RECENT_RANGES.iter().map(ToString::to_string).collect(),
            legacy_spreadsheet_id: LEGACY_SPREADSHEET_ID.to_string(),
            legacy_range: LEGACY_RANGE.to_string(),
        }
    }

    /// Builds the batch URL for the recent export.
    ///
    /// URL format: `{BASE_URL}/{ID}/values:batchGet?key={KEY}&ranges={RANGE}...&majorDimension=COLUMNS`
    #[must_use]
    pub fn recent_url(&self) -> String {
        let ranges: String = self
            .recent_ranges
            .iter()
            .map(|range| format!("&ranges={}", encode_range(range)))
            .collect();
        format!(
            "{}/{}/values:batchGet?key={}{}&majorDimension=COLUMNS",
            BASE_URL, self.recent_spreadsheet_id, self.api_key, ranges
        )
    }

    /// Builds the single-range URL for the legacy export.
    ///
    /// URL format: `{BASE_URL}/{ID}/values/{RANGE}?key={KEY}`
    #[must_use]
    pub fn legacy_url(&self) -> String {
        format!(
            "{}/{}/values/{}?key={}",
            BASE_URL,
            self.legacy_spreadsheet_id,
            encode_range(&self.legacy_range),
            self.api_key
        )
    }
}

impl std::fmt::Debug for SheetsEndpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsEndpoints")
            .field("api_key", &"<redacted>")
            .field("recent_spreadsheet_id", &self.recent_spreadsheet_id)
            .field("recent_ranges", &self.recent_ranges)
            .field("legacy_spreadsheet_id", &self.legacy_spreadsheet_id)
            .field("legacy_range", &self.legacy_range)
            .finish()
    }
}

/// Escapes the characters of an A1 range that cannot appear in a URL.
fn encode_range(range: &str) -> String {
    range.replace('%', "%25").replace(' ', "%20").replace('\'', "%27")
}

/// Replaces the value of the `key` query parameter so the URL can be logged.
#[must_use]
pub fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some(("key", _)) => "key=REDACTED".to_string(),
            _ => param.to_string(),
        })
        .collect();
    format!("{base}?{}", query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_url() {
        let endpoints = SheetsEndpoints::new("abc123");
        assert_eq!(
            endpoints.recent_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/1d8en4AFHupjRkwldCRICiQJVIIkJCJqjKTCwBh7GweY/values:batchGet?key=abc123&ranges=2019!B4:M33&ranges=2020!B2:M33&ranges=2021!B2:M33&majorDimension=COLUMNS"
        );
    }

    #[test]
    fn test_legacy_url_encodes_space() {
        let endpoints = SheetsEndpoints::new("abc123");
        assert_eq!(
            endpoints.legacy_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/1u82v-JbO0vyFXsEw2eORD0RY5tRov7lXgzEuvCKxo9s/values/Exchange%20Log!A7:B1782?key=abc123"
        );
    }

    #[test]
    fn test_redact_hides_key() {
        let endpoints = SheetsEndpoints::new("secret");
        let redacted = redact(&endpoints.recent_url());
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("key=REDACTED"));
        assert!(redacted.contains("majorDimension=COLUMNS"));

        assert_eq!(redact("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_debug_hides_key() {
        let endpoints = SheetsEndpoints::new("secret");
        assert!(!format!("{endpoints:?}").contains("secret"));
    }
}
