//! CSV output format.

use dilex_types::{ExchangeState, NormalizedStore, ProjectionEntry};
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self::new().with_delimiter('\t')
    }
}

/// Splits a state into its `state,value,low,high` columns.
fn state_columns(state: ExchangeState) -> (&'static str, String, String, String) {
    let value = state
        .representative_value()
        .map_or_else(String::new, |v| v.to_string());
    match state {
        ExchangeState::InvalidData => ("invalid_data", value, String::new(), String::new()),
        ExchangeState::Backlogged => ("backlogged", value, String::new(), String::new()),
        ExchangeState::Value { .. } => ("value", value, String::new(), String::new()),
        ExchangeState::Range { low, high } => ("range", value, low.to_string(), high.to_string()),
    }
}

impl Formatter for CsvFormatter {
    fn write_projection<W: Write + Send>(
        &self,
        entries: &[ProjectionEntry],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}value")?;
        }

        for entry in entries {
            writeln!(writer, "{}{d}{}", entry.date.format("%Y-%m-%d"), entry.value)?;
        }

        Ok(())
    }

    fn write_store<W: Write + Send>(
        &self,
        store: &NormalizedStore,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "year{d}month{d}day{d}state{d}value{d}low{d}high")?;
        }

        for (year, months) in store.iter() {
            for (month, days) in months.iter() {
                for entry in days {
                    let (state, value, low, high) = state_columns(entry.state);
                    writeln!(
                        writer,
                        "{year}{d}{month}{d}{}{d}{state}{d}{value}{d}{low}{d}{high}",
                        entry.day
                    )?;
                }
            }
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
