//! Core data model for the dilex exchange-rate pipeline.
//!
//! This crate provides the fundamental data structures used throughout dilex:
//!
//! - [`ExchangeState`] - A single day's reading (value, range, backlog, invalid)
//! - [`DayEntry`] - A day number paired with its reading
//! - [`MonthTable`] - Months of one year in first-insertion order
//! - [`NormalizedStore`] - Year -> month -> days store shared by both sources
//! - [`ProjectionEntry`] - One point of the chronological projection
//! - [`TimeRange`] - Trailing display window over the projection

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dilex/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod projection;
mod state;
mod store;
mod time_range;

pub use error::{DateConstructionError, DilexError, Result};
pub use projection::{ProjectionEntry, window};
pub use state::{DayEntry, ExchangeState, midpoint};
pub use store::{MonthTable, NormalizedStore};
pub use time_range::{TimeRange, TimeRangeParseError};
