//! Error types for dilex.

use thiserror::Error;

/// Result type alias for dilex operations.
pub type Result<T> = std::result::Result<T, DilexError>;

/// Errors that can occur while loading and projecting exchange data.
#[derive(Error, Debug)]
pub enum DilexError {
    /// A source could not be retrieved.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A source was retrieved but did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A day entry could not be placed on the calendar.
    #[error(transparent)]
    DateConstruction(#[from] DateConstructionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A day entry whose (day, month, year) is not a valid calendar date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid calendar date: {day} {month} {year}")]
pub struct DateConstructionError {
    /// Day number from the entry.
    pub day: i32,
    /// Month name from the store.
    pub month: String,
    /// Year label from the store.
    pub year: String,
}
