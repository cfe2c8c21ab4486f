//! Export command implementation.
//!
//! Writes either the windowed projection or the full normalized store in
//! one of the supported output formats.

use crate::GlobalOptions;
use crate::display::{Format, Payload, WriteOptions, write_payload};
use anyhow::{Context, Result};
use dilex_lib::TimeRange;
use std::path::PathBuf;
use tracing::warn;

/// Arguments of the export command.
pub(crate) struct ExportRequest {
    pub(crate) range: TimeRange,
    pub(crate) format: Format,
    pub(crate) output: Option<PathBuf>,
    pub(crate) store: bool,
    pub(crate) strict: bool,
    pub(crate) write: WriteOptions,
}

/// Runs a fetch cycle and writes the requested data.
pub(crate) async fn export(options: &GlobalOptions, request: ExportRequest) -> Result<()> {
    let (service, report) = super::load(options).await?;
    if report.failures() > 0 {
        warn!(failures = report.failures(), "exporting partial data");
    }

    let output = request.output.as_deref();
    let store = service.current_store();

    if request.store {
        write_payload(Payload::Store(&store), output, request.format, request.write)?;
    } else {
        let projection = if request.strict {
            service.try_projection()?
        } else {
            service.projection()
        };
        let entries = request.range.apply(&projection);
        write_payload(Payload::Projection(entries), output, request.format, request.write)
            .with_context(|| format!("Failed to write {} export", request.format))?;
    }

    if let Some(path) = output
        && !options.quiet
    {
        eprintln!("Output written to: {}", path.display());
    }
    Ok(())
}
