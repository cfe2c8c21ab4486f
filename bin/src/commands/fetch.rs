//! Fetch command implementation.
//!
//! Runs one cycle against both sources and reports what each contributed.

use crate::GlobalOptions;
use anyhow::{Result, bail};
use dilex_lib::{CycleReport, NormalizedStore, SourceOutcome, StoreSnapshot};

/// Runs a fetch cycle and prints a per-source summary.
pub(crate) async fn fetch(options: &GlobalOptions) -> Result<()> {
    let (service, report) = super::load(options).await?;
    let snapshot = service.snapshot();

    print_report(&report);
    print_summary(&snapshot);

    if report.failures() == report.sources.len() {
        bail!("No source could be loaded");
    }
    Ok(())
}

fn print_report(report: &CycleReport) {
    println!("{:<8} {:<10} {}", "SOURCE", "RESULT", "DETAIL");
    println!("{}", "-".repeat(60));

    for source in &report.sources {
        let (result, detail) = match &source.outcome {
            SourceOutcome::Merged {
                years,
                days,
                months_added,
            } => (
                "merged",
                format!("{years} years, {days} days ({months_added} new months)"),
            ),
            SourceOutcome::TransportFailed(err) => ("failed", err.to_string()),
            SourceOutcome::DecodeFailed(err) => ("invalid", err.to_string()),
        };
        println!("{:<8} {:<10} {}", source.kind.as_str(), result, detail);
    }
}

fn month_count(store: &NormalizedStore) -> usize {
    store.iter().map(|(_, table)| table.len()).sum()
}

fn print_summary(snapshot: &StoreSnapshot) {
    let store = &snapshot.store;
    println!();
    println!("Status:     {} (cycle {})", snapshot.status, snapshot.generation);
    println!(
        "Store:      {} years, {} months, {} days",
        store.len(),
        month_count(store),
        store.day_count()
    );

    if let (Some(first), Some(last)) = (store.years().next(), store.years().last()) {
        println!("Years:      {first} - {last}");
    }
}
