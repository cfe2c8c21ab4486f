//! Immutable views of the published store.

use std::sync::Arc;

use dilex_types::NormalizedStore;

/// Load status of the published store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadStatus {
    /// No fetch cycle has started yet.
    #[default]
    Idle,
    /// A fetch cycle is running; the store may be partially populated.
    Loading,
    /// The last fetch cycle has settled; the store may still be empty.
    Ready,
}

impl LoadStatus {
    /// Returns the status as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A point-in-time copy of the published store.
///
/// A new snapshot is published on every mutation. Snapshots share the
/// underlying store until the next mutation copies it.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Fetch cycle that produced this snapshot (0 before the first cycle).
    pub generation: u64,
    /// Load status at the time of the snapshot.
    pub status: LoadStatus,
    /// The store contents.
    pub store: Arc<NormalizedStore>,
}

impl StoreSnapshot {
    /// Returns true once the snapshot's cycle has settled.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}
