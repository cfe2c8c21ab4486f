//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod fetch;
pub(crate) mod show;

use crate::GlobalOptions;
use anyhow::{Context, Result};
use dilex_lib::prelude::*;
use dilex_lib::CycleReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Builds the service and runs one fetch cycle behind a spinner.
pub(crate) async fn load(
    options: &GlobalOptions,
) -> Result<(ExchangeService<FetchClient>, CycleReport)> {
    let api_key = options
        .api_key
        .clone()
        .context("No API key: pass --api-key or set DILEX_API_KEY")?;

    let client = FetchClient::with_defaults().context("Failed to create HTTP client")?;
    let config = ServiceConfig::new(api_key).with_fetch_timeout(options.timeout);
    let service = ExchangeService::new(client, config);

    let progress = if options.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?,
        );
        pb.set_message("Fetching exchange logs");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let report = service.run_fetch_cycle().await;

    progress.finish_and_clear();
    Ok((service, report))
}
