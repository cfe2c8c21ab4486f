//! Display utilities and output formatting for the dilex CLI.

use anyhow::Result;
use chrono::Month;
use clap::ValueEnum;
use dilex_lib::prelude::*;
use dilex_lib::FormatError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for exported data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the library format this CLI choice maps to.
    pub(crate) const fn output_format(self) -> OutputFormat {
        match self {
            Self::Csv => OutputFormat::Csv,
            Self::Tsv => OutputFormat::Tsv,
            Self::Json => OutputFormat::Json,
            Self::Ndjson => OutputFormat::Ndjson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output_format().extension())
    }
}

/// What an export writes.
#[derive(Clone, Copy)]
pub(crate) enum Payload<'a> {
    Projection(&'a [ProjectionEntry]),
    Store(&'a NormalizedStore),
}

/// Human-readable description of a day's reading.
pub(crate) fn describe_state(state: &ExchangeState) -> String {
    match *state {
        ExchangeState::InvalidData => "Data unavailable".to_string(),
        ExchangeState::Backlogged => "Empty due to backlog".to_string(),
        ExchangeState::Value { value } => format!("VALUE: {value}"),
        ExchangeState::Range { low, high } => format!(
            "HIGH: {high}, LOW: {low}, AVE: {}",
            dilex_lib::midpoint(low, high)
        ),
    }
}

/// Calendar position of a month name, if it is one.
fn month_number(name: &str) -> Option<u32> {
    name.parse::<Month>().ok().map(|month| month.number_from_month())
}

/// Months of a year ordered newest first; unrecognized names sort last.
pub(crate) fn months_newest_first(table: &MonthTable) -> Vec<(&str, &[DayEntry])> {
    let mut months: Vec<_> = table.iter().collect();
    months.sort_by_key(|(name, _)| std::cmp::Reverse(month_number(name).unwrap_or(0)));
    months
}

/// Prints the projection as a two-column table.
pub(crate) fn print_projection(entries: &[ProjectionEntry]) {
    println!("{:<12} {:>10}", "DATE", "VALUE");
    println!("{}", "-".repeat(23));
    for entry in entries {
        println!("{:<12} {:>10}", entry.date.format("%Y-%m-%d"), entry.value);
    }
}

/// Prints every month of the store, newest year and month first.
pub(crate) fn print_store(store: &NormalizedStore) {
    for (year, table) in store.iter().collect::<Vec<_>>().into_iter().rev() {
        for (month, days) in months_newest_first(table) {
            println!("\n{month} {year}");
            for entry in days {
                println!("  {:>2}  {}", entry.day, describe_state(&entry.state));
            }
        }
    }
}

fn emit<F: Formatter>(
    formatter: &F,
    payload: Payload<'_>,
    writer: impl Write + Send,
) -> Result<(), FormatError> {
    match payload {
        Payload::Projection(entries) => formatter.write_projection(entries, writer),
        Payload::Store(store) => formatter.write_store(store, writer),
    }
}

/// Writer options that only apply to some formats.
#[derive(Clone, Copy)]
pub(crate) struct WriteOptions {
    /// Emit a header row (CSV/TSV).
    pub(crate) header: bool,
    /// Pretty-print the document (JSON).
    pub(crate) pretty: bool,
}

/// Writes the payload to a file, or to stdout when no path is given.
pub(crate) fn write_payload(
    payload: Payload<'_>,
    output: Option<&Path>,
    format: Format,
    options: WriteOptions,
) -> Result<()> {
    let mut writer: BufWriter<Box<dyn Write + Send>> = match output {
        Some(path) => BufWriter::new(Box::new(File::create(path)?)),
        None => BufWriter::new(Box::new(std::io::stdout())),
    };

    match format.output_format() {
        OutputFormat::Csv => emit(
            &CsvFormatter::new().with_header(options.header),
            payload,
            &mut writer,
        )?,
        OutputFormat::Tsv => emit(
            &CsvFormatter::tsv().with_header(options.header),
            payload,
            &mut writer,
        )?,
        OutputFormat::Json => emit(
            &JsonFormatter::new().with_pretty(options.pretty),
            payload,
            &mut writer,
        )?,
        OutputFormat::Ndjson => emit(&JsonFormatter::ndjson(), payload, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}
