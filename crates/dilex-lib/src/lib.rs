//! Fetch, normalize, and project exchange readings from published spreadsheets.
//!
//! This is a facade crate that re-exports functionality from the dilex
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use dilex_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FetchClient::with_defaults()?;
//!     let service = ExchangeService::new(client, ServiceConfig::new("api-key"));
//!
//!     let report = service.run_fetch_cycle().await;
//!     println!("{} source(s) failed", report.failures());
//!
//!     for entry in service.projection_window(TimeRange::Month) {
//!         println!("{} {}", entry.date, entry.value);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dilex/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use dilex_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use dilex_fetch::{
    ClientConfig, DecodeError, FetchClient, FetchError, Fetcher, SourceKind, decode_legacy,
    decode_recent, normalize_legacy, normalize_recent, url::SheetsEndpoints,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use dilex_aggregate::{build_projection, merge, merge_into, try_build_projection};

// Re-export formatters
#[cfg(feature = "format")]
pub use dilex_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

// Re-export the fetch service
#[cfg(feature = "service")]
pub use dilex_service::{
    CycleReport, ExchangeService, LoadStatus, ServiceConfig, SourceOutcome, SourceReport,
    StoreSnapshot,
};

/// Prelude module for convenient imports.
///
/// ```
/// use dilex_lib::prelude::*;
/// ```
pub mod prelude {
    pub use dilex_types::{
        DayEntry, DilexError, ExchangeState, MonthTable, NormalizedStore, ProjectionEntry,
        Result, TimeRange,
    };

    #[cfg(feature = "fetch")]
    pub use dilex_fetch::{ClientConfig, FetchClient, Fetcher, SourceKind};

    #[cfg(feature = "aggregate")]
    pub use dilex_aggregate::{build_projection, merge};

    #[cfg(feature = "format")]
    pub use dilex_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(feature = "service")]
    pub use dilex_service::{ExchangeService, LoadStatus, ServiceConfig, StoreSnapshot};
}
