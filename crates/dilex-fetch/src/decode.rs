//! JSON response shapes of the two spreadsheet exports.

use dilex_types::DilexError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while decoding a response body.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The response body was empty.
    #[error("Empty response body")]
    EmptyBody,

    /// The body was not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with an error object instead of values.
    #[error("API error {code}: {message}")]
    Api {
        /// Error code reported by the API.
        code: i64,
        /// Error message reported by the API.
        message: String,
    },
}

impl From<DecodeError> for DilexError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Error object returned by the Sheets API in place of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Error code, usually the HTTP status.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Batch response of the recent export: one block per year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentResponse {
    /// Year blocks in request order.
    #[serde(default)]
    pub value_ranges: Vec<YearBlock>,
    /// Error reported instead of values.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// One year of the recent export, column-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct YearBlock {
    /// A1 range the block was read from, e.g. `'2020'!B2:M33`.
    #[serde(default)]
    pub range: String,
    /// Columns; the first cell of each column is the month name.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl YearBlock {
    /// Creates a block from a range label and columns.
    #[must_use]
    pub const fn new(range: String, values: Vec<Vec<String>>) -> Self {
        Self { range, values }
    }
}

/// Single-range response of the legacy export: `[date, value]` rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LegacyResponse {
    /// Rows in sheet order.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
    /// Error reported instead of values.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Decodes the recent export.
///
/// # Errors
///
/// Returns an error if the body is empty, is not the expected JSON shape, or
/// carries an API error object.
pub fn decode_recent(body: &[u8]) -> Result<RecentResponse, DecodeError> {
    let response: RecentResponse = decode(body)?;
    match response.error {
        Some(error) => Err(api_error(error)),
        None => Ok(response),
    }
}

/// Decodes the legacy export.
///
/// # Errors
///
/// Returns an error if the body is empty, is not the expected JSON shape, or
/// carries an API error object.
pub fn decode_legacy(body: &[u8]) -> Result<LegacyResponse, DecodeError> {
    let response: LegacyResponse = decode(body)?;
    match response.error {
        Some(error) => Err(api_error(error)),
        None => Ok(response),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }
    Ok(serde_json::from_slice(body)?)
}

fn api_error(error: ApiErrorBody) -> DecodeError {
    DecodeError::Api {
        code: error.code,
        message: error.message,
    }
}
