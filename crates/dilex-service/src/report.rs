//! Outcome reporting for fetch cycles.

use dilex_fetch::{DecodeError, FetchError, SourceKind};

/// What happened to one source during a cycle.
#[derive(Debug)]
pub enum SourceOutcome {
    /// The source decoded and was merged into the published store.
    Merged {
        /// Years the source provided.
        years: usize,
        /// Day entries the source provided.
        days: usize,
        /// Months that were new to the published store.
        months_added: usize,
    },
    /// The source could not be retrieved; nothing was merged.
    TransportFailed(FetchError),
    /// The source was retrieved but could not be decoded; an empty store was merged.
    DecodeFailed(DecodeError),
}

impl SourceOutcome {
    /// Returns true if the source was merged.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Outcome of one source.
#[derive(Debug)]
pub struct SourceReport {
    /// Which source.
    pub kind: SourceKind,
    /// What happened to it.
    pub outcome: SourceOutcome,
}

/// Outcome of a complete fetch cycle, in completion order.
#[derive(Debug)]
pub struct CycleReport {
    /// Generation of the cycle.
    pub generation: u64,
    /// One report per source, in the order the sources settled.
    pub sources: Vec<SourceReport>,
}

impl CycleReport {
    /// Returns the report for a source, if it settled.
    #[must_use]
    pub fn source(&self, kind: SourceKind) -> Option<&SourceOutcome> {
        self.sources
            .iter()
            .find(|report| report.kind == kind)
            .map(|report| &report.outcome)
    }

    /// Returns the number of sources that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.sources
            .iter()
            .filter(|report| !report.outcome.is_merged())
            .count()
    }

    /// Returns the settle order of the sources.
    #[must_use]
    pub fn completion_order(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|report| report.kind).collect()
    }
}
