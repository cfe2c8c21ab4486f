//! dilex CLI - fetch, merge and project published exchange readings.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use dilex_lib::TimeRange;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use display::{Format, WriteOptions};

#[derive(Parser)]
#[command(name = "dilex")]
#[command(about = "Fetch, merge and project published exchange readings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Sheets API key
    #[arg(long, env = "DILEX_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Per-source fetch timeout in seconds
    #[arg(long, env = "DILEX_TIMEOUT", global = true, default_value = "45")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fetch cycle and summarize what each source contributed
    Fetch,

    /// Show the recent projection and the per-month readings
    Show {
        /// Display window (1W, 1M, 3M, 1Y, 3Y, All)
        #[arg(short, long, default_value = "1W")]
        range: TimeRange,
    },

    /// Write the projection (or the whole store) to a file
    Export {
        /// Projection window (1W, 1M, 3M, 1Y, 3Y, All)
        #[arg(short, long, default_value = "All")]
        range: TimeRange,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the normalized store instead of the projection
        #[arg(long)]
        store: bool,

        /// Fail on entries that cannot be placed on the calendar
        #[arg(long)]
        strict: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Omit the header row from CSV/TSV output
        #[arg(long)]
        no_header: bool,
    },
}

/// Options shared by every command.
pub(crate) struct GlobalOptions {
    pub(crate) api_key: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) quiet: bool,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let default_filter = if verbose >= 3 {
        level.to_string()
    } else {
        ["dilex", "dilex_service", "dilex_fetch", "dilex_aggregate"]
            .iter()
            .fold("error".to_string(), |filter, target| format!("{filter},{target}={level}"))
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose > 0))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    init_tracing(cli.verbose, cli.quiet);

    let options = GlobalOptions {
        api_key: cli.api_key,
        timeout: Duration::from_secs(cli.timeout),
        quiet: cli.quiet,
    };

    match command {
        Commands::Fetch => commands::fetch::fetch(&options).await,
        Commands::Show { range } => commands::show::show(&options, range).await,
        Commands::Export {
            range,
            format,
            output,
            store,
            strict,
            pretty,
            no_header,
        } => {
            let request = commands::export::ExportRequest {
                range,
                format,
                output,
                store,
                strict,
                write: WriteOptions {
                    header: !no_header,
                    pretty,
                },
            };
            commands::export::export(&options, request).await
        }
    }
}
