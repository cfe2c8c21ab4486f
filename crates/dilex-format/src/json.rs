//! JSON output format.

use dilex_types::{ExchangeState, NormalizedStore, ProjectionEntry};
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum JsonStyle {
    /// One JSON document.
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

/// One flattened day of the store, as written in NDJSON style.
#[derive(Serialize)]
struct StoreRow<'a> {
    year: &'a str,
    month: &'a str,
    day: i32,
    state: ExchangeState,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_document<W: Write, T: Serialize + ?Sized>(
        &self,
        value: &T,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_projection<W: Write + Send>(
        &self,
        entries: &[ProjectionEntry],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => self.write_document(entries, writer)?,
            JsonStyle::Ndjson => {
                for entry in entries {
                    serde_json::to_writer(&mut writer, entry)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn write_store<W: Write + Send>(
        &self,
        store: &NormalizedStore,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            // Keyed by year, then by month in source order.
            JsonStyle::Array => self.write_document(store, writer)?,
            JsonStyle::Ndjson => {
                for (year, months) in store.iter() {
                    for (month, days) in months.iter() {
                        for entry in days {
                            let row = StoreRow {
                                year,
                                month,
                                day: entry.day,
                                state: entry.state,
                            };
                            serde_json::to_writer(&mut writer, &row)?;
                            writeln!(writer)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
