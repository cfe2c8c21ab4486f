//! Published exchange store and fetch orchestration for dilex.
//!
//! This crate owns the single mutable piece of the pipeline:
//!
//! - [`ExchangeService`] - Published store, snapshots and fetch cycles
//! - [`StoreSnapshot`] / [`LoadStatus`] - What subscribers observe
//! - [`CycleReport`] / [`SourceOutcome`] - Per-source result of a cycle
//! - [`ServiceConfig`] - Endpoints and per-fetch timeout

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dilex/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod report;
mod service;
mod snapshot;

pub use config::ServiceConfig;
pub use report::{CycleReport, SourceOutcome, SourceReport};
pub use service::{ExchangeService, MAX_CONCURRENT_FETCHES};
pub use snapshot::{LoadStatus, StoreSnapshot};
