//! Show command implementation.

use crate::GlobalOptions;
use crate::display::{print_projection, print_store};
use anyhow::Result;
use dilex_lib::TimeRange;
use tracing::warn;

/// Prints the windowed projection followed by the per-month readings.
pub(crate) async fn show(options: &GlobalOptions, range: TimeRange) -> Result<()> {
    let (service, report) = super::load(options).await?;
    if report.failures() > 0 {
        warn!(failures = report.failures(), "showing partial data");
    }

    let entries = service.projection_window(range);
    println!("Projection ({range}, {} entries)\n", entries.len());
    print_projection(&entries);

    print_store(&service.current_store());
    Ok(())
}
