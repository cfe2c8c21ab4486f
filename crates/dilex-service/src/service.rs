//! The published store and the fetch cycle that fills it.

use std::sync::Arc;

use dilex_aggregate::{build_projection, merge_into, try_build_projection};
use dilex_fetch::{DecodeError, FetchError, Fetcher, SourceKind, url::redact};
use dilex_types::{NormalizedStore, ProjectionEntry, TimeRange};
use futures::stream::{self, StreamExt};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{CycleReport, LoadStatus, ServiceConfig, SourceOutcome, SourceReport, StoreSnapshot};

/// At most this many source fetches run at once.
pub const MAX_CONCURRENT_FETCHES: usize = 2;

/// Why a source contributed nothing.
#[derive(Debug)]
enum LoadError {
    Transport(FetchError),
    Decode(DecodeError),
}

/// Owns the published store and runs fetch cycles against it.
///
/// Every mutation publishes a new [`StoreSnapshot`] to subscribers. Readers
/// always get copies, so they never observe a store mid-merge. Cycles are
/// serialized: a cycle requested while another is running starts after it.
#[derive(Debug)]
pub struct ExchangeService<F> {
    fetcher: F,
    config: ServiceConfig,
    state: watch::Sender<StoreSnapshot>,
    cycle_lock: Mutex<()>,
}

impl<F: Fetcher> ExchangeService<F> {
    /// Creates a service with an empty, idle store.
    #[must_use]
    pub fn new(fetcher: F, config: ServiceConfig) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            fetcher,
            config,
            state,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Returns the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// Returns the current store.
    #[must_use]
    pub fn current_store(&self) -> Arc<NormalizedStore> {
        Arc::clone(&self.state.borrow().store)
    }

    /// Returns the current load status.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status
    }

    /// Derives the full ascending projection of the current store.
    #[must_use]
    pub fn projection(&self) -> Vec<ProjectionEntry> {
        build_projection(&self.current_store())
    }

    /// Derives the full projection, failing on the first undatable entry.
    ///
    /// # Errors
    ///
    /// Returns [`DilexError::DateConstruction`](dilex_types::DilexError) if
    /// an entry's day, month and year do not form a calendar date.
    pub fn try_projection(&self) -> dilex_types::Result<Vec<ProjectionEntry>> {
        Ok(try_build_projection(&self.current_store())?)
    }

    /// Derives the most recent entries of the projection for a display window.
    #[must_use]
    pub fn projection_window(&self, range: TimeRange) -> Vec<ProjectionEntry> {
        range.apply(&self.projection()).to_vec()
    }

    /// Clears the store and starts a new generation in the `Loading` state.
    ///
    /// Waits for a running cycle to finish first, so a cycle never merges
    /// into a generation it did not start. Returns the new generation.
    pub async fn reset(&self) -> u64 {
        let _cycle = self.cycle_lock.lock().await;
        self.begin_generation()
    }

    fn begin_generation(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.status = LoadStatus::Loading;
            snapshot.store = Arc::new(NormalizedStore::new());
            generation = snapshot.generation;
        });
        generation
    }

    /// Merges a source's store into the published one, keeping existing entries.
    fn merge_source(&self, incoming: NormalizedStore) -> usize {
        let mut added = 0;
        self.state.send_modify(|snapshot| {
            added = merge_into(Arc::make_mut(&mut snapshot.store), incoming);
        });
        added
    }

    fn mark_ready(&self, generation: u64) {
        self.state.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.status = LoadStatus::Ready;
            true
        });
    }

    /// Runs one fetch cycle to completion.
    ///
    /// The store is cleared, both sources are fetched concurrently, and each
    /// is merged as soon as it settles. A failed source never blocks the
    /// other. The status becomes `Ready` once both sources have settled.
    pub async fn run_fetch_cycle(&self) -> CycleReport {
        let _cycle = self.cycle_lock.lock().await;
        let generation = self.begin_generation();
        info!(generation, "starting fetch cycle");

        let endpoints = &self.config.endpoints;
        let sources = [
            (SourceKind::Recent, endpoints.recent_url()),
            (SourceKind::Legacy, endpoints.legacy_url()),
        ];

        let mut pending = stream::iter(sources)
            .map(|(kind, url)| async move { (kind, self.load_source(kind, &url).await) })
            .buffer_unordered(MAX_CONCURRENT_FETCHES);

        let mut reports = Vec::with_capacity(MAX_CONCURRENT_FETCHES);
        while let Some((kind, result)) = pending.next().await {
            let outcome = self.settle(kind, result);
            reports.push(SourceReport { kind, outcome });
        }

        self.mark_ready(generation);
        let snapshot = self.snapshot();
        info!(
            generation,
            years = snapshot.store.len(),
            days = snapshot.store.day_count(),
            "fetch cycle ready"
        );

        CycleReport {
            generation,
            sources: reports,
        }
    }

    /// Fetches and decodes one source.
    async fn load_source(
        &self,
        kind: SourceKind,
        url: &str,
    ) -> Result<NormalizedStore, LoadError> {
        debug!(source = %kind, url = %redact(url), "fetching source");

        let timeout = self.config.fetch_timeout;
        let body = tokio::time::timeout(timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| LoadError::Transport(FetchError::Timeout(timeout)))?
            .map_err(LoadError::Transport)?;

        kind.decode(&body).map_err(LoadError::Decode)
    }

    /// Applies a settled source to the published store.
    fn settle(
        &self,
        kind: SourceKind,
        result: Result<NormalizedStore, LoadError>,
    ) -> SourceOutcome {
        match result {
            Ok(store) => {
                let years = store.len();
                let days = store.day_count();
                let months_added = self.merge_source(store);
                info!(source = %kind, years, days, months_added, "merged source");
                SourceOutcome::Merged {
                    years,
                    days,
                    months_added,
                }
            }
            Err(LoadError::Transport(error)) => {
                warn!(source = %kind, %error, "source fetch failed");
                SourceOutcome::TransportFailed(error)
            }
            Err(LoadError::Decode(error)) => {
                warn!(source = %kind, %error, "source decode failed; contributing an empty store");
                self.merge_source(NormalizedStore::new());
                SourceOutcome::DecodeFailed(error)
            }
        }
    }
}

impl<F: Fetcher + 'static> ExchangeService<F> {
    /// Starts a fetch cycle on the runtime and returns immediately.
    ///
    /// Progress is observable through [`subscribe`](Self::subscribe); the
    /// handle resolves to the cycle's report.
    pub fn start_fetch_cycle(self: &Arc<Self>) -> JoinHandle<CycleReport> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.run_fetch_cycle().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use dilex_types::{DayEntry, ExchangeState};
    use std::time::Duration;

    const RECENT_BODY: &str = r#"{"valueRanges": [
        {"range": "'2021'!B2:M33", "values": [["January", "25", "--", "75"], ["February"]]},
        {"range": "'2020'!B2:M33", "values": [["March", "100", "75-80", "Empty"]]}
    ]}"#;

    const LEGACY_BODY: &str = r#"{"values": [
        ["3/1/2020", "1"],
        ["4/1/2020", "2"],
        ["12/30/2019", "3"],
        ["12/31/2019", "oops"]
    ]}"#;

    #[derive(Debug, Clone)]
    enum Reply {
        Body(&'static str),
        Fail(u16),
    }

    /// Answers by source, after a per-source delay.
    #[derive(Debug, Clone)]
    struct FakeFetcher {
        recent: (Reply, Duration),
        legacy: (Reply, Duration),
    }

    impl FakeFetcher {
        fn new(recent: Reply, legacy: Reply) -> Self {
            Self {
                recent: (recent, Duration::ZERO),
                legacy: (legacy, Duration::ZERO),
            }
        }

        fn with_delays(mut self, recent: Duration, legacy: Duration) -> Self {
            self.recent.1 = recent;
            self.legacy.1 = legacy;
            self
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
            let (reply, delay) = if url.contains("batchGet") {
                self.recent.clone()
            } else {
                self.legacy.clone()
            };
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Body(body) => Ok(Bytes::from_static(body.as_bytes())),
                Reply::Fail(status) => Err(FetchError::Status { status }),
            }
        }
    }

    fn service(fetcher: FakeFetcher) -> ExchangeService<FakeFetcher> {
        ExchangeService::new(fetcher, ServiceConfig::new("test-key"))
    }

    #[tokio::test]
    async fn test_initial_state_is_idle_and_empty() {
        let service = service(FakeFetcher::new(Reply::Body("{}"), Reply::Body("{}")));
        let snapshot = service.snapshot();

        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.status, LoadStatus::Idle);
        assert!(snapshot.store.is_empty());
        assert!(service.projection().is_empty());
    }

    #[tokio::test]
    async fn test_cycle_merges_both_sources() {
        let service = service(FakeFetcher::new(
            Reply::Body(RECENT_BODY),
            Reply::Body(LEGACY_BODY),
        ));
        let report = service.run_fetch_cycle().await;

        assert_eq!(report.generation, 1);
        assert_eq!(report.failures(), 0);
        assert_eq!(service.status(), LoadStatus::Ready);

        let store = service.current_store();
        assert_eq!(store.years().collect::<Vec<_>>(), ["2019", "2020", "2021"]);
        assert_eq!(
            store.get("2021").unwrap().get("January").unwrap(),
            &[
                DayEntry::new(1, ExchangeState::value(25)),
                DayEntry::new(2, ExchangeState::value(75)),
            ]
        );
        assert!(!store.get("2021").unwrap().contains("February"));

        let projection = service.projection();
        assert!(projection.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(projection.last().unwrap().value, 75);
        assert_eq!(service.projection_window(TimeRange::Week).len(), 7.min(projection.len()));
    }

    #[tokio::test]
    async fn test_colliding_month_keeps_first_settled_source() {
        // Both sources provide March 2020; the recent source settles first.
        let fetcher = FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Body(LEGACY_BODY))
            .with_delays(Duration::ZERO, Duration::from_millis(100));
        let service = service(fetcher);
        let report = service.run_fetch_cycle().await;

        assert_eq!(report.completion_order(), [SourceKind::Recent, SourceKind::Legacy]);
        let store = service.current_store();
        let march = store.get("2020").unwrap().get("March").unwrap();
        assert_eq!(march[0], DayEntry::new(1, ExchangeState::value(100)));
        assert_eq!(march.len(), 3);
        assert!(store.get("2020").unwrap().contains("April"));
    }

    #[tokio::test]
    async fn test_colliding_month_keeps_first_settled_source_reversed() {
        // Same data, but the legacy source settles first this time.
        let fetcher = FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Body(LEGACY_BODY))
            .with_delays(Duration::from_millis(100), Duration::ZERO);
        let service = service(fetcher);
        let report = service.run_fetch_cycle().await;

        assert_eq!(report.completion_order(), [SourceKind::Legacy, SourceKind::Recent]);
        let store = service.current_store();
        let march = store.get("2020").unwrap().get("March").unwrap();
        assert_eq!(march, &[DayEntry::new(1, ExchangeState::value(1))]);
        assert!(store.get("2021").unwrap().contains("January"));
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_block_other_source() {
        let service = service(FakeFetcher::new(Reply::Fail(503), Reply::Body(LEGACY_BODY)));
        let report = service.run_fetch_cycle().await;

        assert!(matches!(
            report.source(SourceKind::Recent),
            Some(SourceOutcome::TransportFailed(FetchError::Status { status: 503 }))
        ));
        assert!(report.source(SourceKind::Legacy).unwrap().is_merged());
        assert_eq!(report.failures(), 1);
        assert_eq!(service.status(), LoadStatus::Ready);
        assert_eq!(service.current_store().day_count(), 4);
    }

    #[tokio::test]
    async fn test_decode_failure_contributes_empty_store() {
        let service = service(FakeFetcher::new(
            Reply::Body(RECENT_BODY),
            Reply::Body("<html>quota exceeded</html>"),
        ));
        let report = service.run_fetch_cycle().await;

        assert!(matches!(
            report.source(SourceKind::Legacy),
            Some(SourceOutcome::DecodeFailed(_))
        ));
        assert_eq!(service.current_store().years().collect::<Vec<_>>(), ["2020", "2021"]);
    }

    #[tokio::test]
    async fn test_empty_sources_still_signal_ready() {
        let service = service(FakeFetcher::new(Reply::Body(""), Reply::Body("")));
        let mut updates = service.subscribe();
        let report = service.run_fetch_cycle().await;

        assert_eq!(report.sources.len(), 2);
        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert!(snapshot.is_ready());
        assert!(snapshot.store.is_empty());
        assert!(service.projection().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_a_transport_failure() {
        let fetcher = FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Body(LEGACY_BODY))
            .with_delays(Duration::from_secs(30), Duration::ZERO);
        let config = ServiceConfig::new("test-key").with_fetch_timeout(Duration::from_millis(50));
        let service = ExchangeService::new(fetcher, config);
        let report = service.run_fetch_cycle().await;

        assert!(matches!(
            report.source(SourceKind::Recent),
            Some(SourceOutcome::TransportFailed(FetchError::Timeout(_)))
        ));
        assert!(service.current_store().contains_year("2019"));
    }

    #[tokio::test]
    async fn test_new_cycle_starts_from_empty() {
        let service = service(FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Fail(500)));
        service.run_fetch_cycle().await;
        assert!(!service.current_store().is_empty());

        let generation = service.reset().await;
        assert_eq!(generation, 2);
        assert_eq!(service.status(), LoadStatus::Loading);
        assert!(service.current_store().is_empty());
    }

    #[tokio::test]
    async fn test_cycles_are_serialized() {
        let fetcher = FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Body(LEGACY_BODY))
            .with_delays(Duration::from_millis(20), Duration::from_millis(10));
        let service = Arc::new(service(fetcher));

        let first = service.start_fetch_cycle();
        let second = service.start_fetch_cycle();
        let (first, second) = (first.await.unwrap(), second.await.unwrap());

        let mut generations = [first.generation, second.generation];
        generations.sort_unstable();
        assert_eq!(generations, [1, 2]);
        assert_eq!(first.failures() + second.failures(), 0);
        assert_eq!(service.snapshot().generation, 2);
        assert_eq!(service.status(), LoadStatus::Ready);
        assert_eq!(service.current_store().years().count(), 3);
    }

    #[tokio::test]
    async fn test_reset_waits_for_running_cycle() {
        let fetcher = FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Body(LEGACY_BODY))
            .with_delays(Duration::from_millis(50), Duration::from_millis(50));
        let service = Arc::new(service(fetcher));

        let cycle = service.start_fetch_cycle();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let generation = service.reset().await;

        // The cycle settled on its own generation before the reset applied.
        let report = cycle.await.unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(report.failures(), 0);
        assert_eq!(generation, 2);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.status, LoadStatus::Loading);
        assert!(snapshot.store.is_empty());

        let report = service.run_fetch_cycle().await;
        assert_eq!(report.generation, 3);
        assert_eq!(service.status(), LoadStatus::Ready);
        assert_eq!(service.current_store().years().count(), 3);
    }

    #[tokio::test]
    async fn test_reset_during_cycle_never_leaves_stale_data() {
        let fetcher = FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Body(LEGACY_BODY))
            .with_delays(Duration::from_millis(30), Duration::from_millis(60));
        let service = Arc::new(service(fetcher));
        let mut updates = service.subscribe();

        let cycle = service.start_fetch_cycle();
        tokio::time::sleep(Duration::from_millis(10)).await;
        service.reset().await;
        cycle.await.unwrap();

        // Once the generation moves on, no snapshot of it carries data.
        let latest = updates.borrow_and_update().clone();
        assert_eq!(latest.generation, 2);
        assert!(latest.store.is_empty());
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_held_by_reader_is_unaffected_by_reset() {
        let service = service(FakeFetcher::new(Reply::Body(RECENT_BODY), Reply::Fail(404)));
        service.run_fetch_cycle().await;

        let held = service.current_store();
        service.reset().await;

        assert!(!held.is_empty());
        assert!(service.current_store().is_empty());
    }

    #[tokio::test]
    async fn test_strict_projection_reports_undatable_entry() {
        let service = service(FakeFetcher::new(
            Reply::Fail(500),
            Reply::Body(r#"{"values": [["3/1/2020", "1"], ["2/30/2020", "2"]]}"#),
        ));
        service.run_fetch_cycle().await;

        assert_eq!(service.projection().len(), 1);
        let err = service.try_projection().unwrap_err();
        assert!(matches!(
            err,
            dilex_types::DilexError::DateConstruction(ref e) if e.day == 30 && e.month == "February"
        ));
    }
}
