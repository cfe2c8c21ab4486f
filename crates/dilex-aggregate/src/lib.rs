//! Merging and projection for the dilex exchange-rate pipeline.
//!
//! This crate turns per-source stores into the published series:
//!
//! - [`merge_into`] / [`merge`] - Key-wise union preferring existing entries
//! - [`build_projection`] - Chronological (date, value) series for charting
//! - [`try_build_projection`] - Strict variant that reports undatable entries

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dilex/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod merge;
mod projection;

pub use merge::{merge, merge_into};
pub use projection::{build_projection, calendar_date, try_build_projection};
