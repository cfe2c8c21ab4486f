//! Retrieval and normalization of the dilex spreadsheet exports.
//!
//! This crate provides the ingestion half of the pipeline:
//!
//! - [`url::SheetsEndpoints`] - Constructs the two export URLs
//! - [`FetchClient`] - HTTP client with connection pooling and retries
//! - [`Fetcher`] - Abstraction over "fetch bytes for a URL"
//! - [`decode_recent`] / [`decode_legacy`] - JSON response decoding
//! - [`recent`] / [`legacy`] - Cell and row parsers for each export
//! - [`SourceKind`] - Decode-and-normalize entry point per export

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dilex/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decode;
pub mod legacy;
mod normalize;
pub mod recent;
pub mod url;

pub use client::{ClientConfig, FetchClient, FetchError, Fetcher};
pub use decode::{
    ApiErrorBody, DecodeError, LegacyResponse, RecentResponse, YearBlock, decode_legacy,
    decode_recent,
};
pub use normalize::{SourceKind, normalize_legacy, normalize_recent};
