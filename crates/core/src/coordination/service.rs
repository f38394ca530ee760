//! Refresh coordinator - owns the day-bucket cache and publishes snapshots

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use messesinfo_domain::{
    CoordinatorStatus, DayKey, MassSnapshot, MessesError, RefreshPhase, Result,
};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::ports::MassSnapshotProvider;
use crate::scraping::{DayBucketCache, MassScraper};

/// State only touched by the task holding the in-flight guard.
#[derive(Default)]
struct CycleState {
    cache: DayBucketCache,
    last_result: Option<Result<Arc<MassSnapshot>>>,
}

/// Coordinator for one tracked church
///
/// At most one refresh cycle runs at a time. Callers arriving while a cycle
/// is in flight wait for it and receive its outcome instead of starting a
/// second network pass.
pub struct MassCoordinator {
    name: String,
    scraper: MassScraper,
    days_ahead: u32,
    retention_days: u32,
    cycle: Mutex<CycleState>,
    completed_cycles: AtomicU64,
    snapshot: RwLock<Option<Arc<MassSnapshot>>>,
    status: RwLock<CoordinatorStatus>,
    phase: RwLock<RefreshPhase>,
}

impl MassCoordinator {
    pub fn new(name: impl Into<String>, scraper: MassScraper, days_ahead: u32) -> Self {
        Self {
            name: name.into(),
            scraper,
            days_ahead,
            retention_days: messesinfo_domain::constants::DEFAULT_RETENTION_DAYS,
            cycle: Mutex::new(CycleState::default()),
            completed_cycles: AtomicU64::new(0),
            snapshot: RwLock::new(None),
            status: RwLock::new(CoordinatorStatus::default()),
            phase: RwLock::new(RefreshPhase::Idle),
        }
    }

    /// Days before today whose buckets are kept on eviction.
    pub fn with_retention_days(mut self, retention_days: u32) -> Self {
        self.retention_days = retention_days;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latest_snapshot(&self) -> Option<Arc<MassSnapshot>> {
        self.snapshot.read().clone()
    }

    pub fn status(&self) -> CoordinatorStatus {
        self.status.read().clone()
    }

    pub fn phase(&self) -> RefreshPhase {
        *self.phase.read()
    }

    /// Run one refresh cycle, or join the one already running.
    ///
    /// On failure the cache and the published snapshot are left untouched and
    /// the cause is wrapped into [`MessesError::UpdateFailed`].
    #[instrument(skip(self), fields(coordinator = %self.name))]
    pub async fn refresh(&self) -> Result<Arc<MassSnapshot>> {
        let observed = self.completed_cycles.load(Ordering::Acquire);
        let mut state = self.cycle.lock().await;

        if self.completed_cycles.load(Ordering::Acquire) > observed {
            if let Some(result) = state.last_result.clone() {
                debug!("joined refresh cycle that completed while waiting");
                return result;
            }
        }

        let _phase = PhaseGuard::enter(&self.phase);
        let started = self.scraper.clock().now();
        self.status.write().last_attempt = Some(started);

        let known = state.cache.known_days();
        let result = match self.scraper.scrape(self.days_ahead, &known).await {
            Ok(buckets) => {
                let fetched_days = buckets.len();
                let cycle = self.completed_cycles.load(Ordering::Acquire) + 1;
                state.cache.merge(buckets);
                let evicted = state.cache.evict_before(self.retention_cutoff());

                let snapshot = Arc::new(MassSnapshot {
                    buckets: state.cache.buckets().clone(),
                    last_success: started,
                    cycle,
                });
                *self.snapshot.write() = Some(snapshot.clone());
                self.record_success(&snapshot);
                info!(
                    cycle,
                    fetched_days,
                    evicted,
                    cached_days = snapshot.day_count(),
                    masses = snapshot.total_masses(),
                    "refresh succeeded"
                );
                Ok(snapshot)
            }
            Err(err) => {
                let failure = MessesError::update_failed(err);
                warn!(error = %failure, cause = failure.root_cause().label(), "refresh failed");
                self.record_failure(&failure);
                Err(failure)
            }
        };

        state.last_result = Some(result.clone());
        self.completed_cycles.fetch_add(1, Ordering::AcqRel);
        result
    }

    /// Drop one day from the cache so the next cycle fetches it again.
    ///
    /// The published snapshot loses the day immediately.
    pub async fn evict_day(&self, day: DayKey) -> bool {
        let mut state = self.cycle.lock().await;
        let removed = state.cache.evict(&day);
        if removed {
            let mut published = self.snapshot.write();
            if let Some(current) = published.as_ref() {
                let mut next = MassSnapshot::clone(current);
                next.buckets.remove(&day);
                *published = Some(Arc::new(next));
            }
            info!(coordinator = %self.name, day = %day, "day evicted");
        }
        removed
    }

    /// Drop every cached bucket. The next cycle refetches the whole window.
    pub async fn clear(&self) {
        self.cycle.lock().await.cache.clear();
        debug!(coordinator = %self.name, "cache cleared");
    }

    fn retention_cutoff(&self) -> DayKey {
        let today = self.scraper.clock().today();
        let cutoff = today.checked_sub_days(Days::new(u64::from(self.retention_days)));
        DayKey::new(cutoff.unwrap_or(NaiveDate::MIN))
    }

    fn record_success(&self, snapshot: &MassSnapshot) {
        let mut status = self.status.write();
        status.last_success = Some(snapshot.last_success);
        status.last_error = None;
        status.last_update_success = true;
        status.completed_cycles = snapshot.cycle;
    }

    fn record_failure(&self, failure: &MessesError) {
        let mut status = self.status.write();
        status.last_error = Some(failure.to_string());
        status.last_update_success = false;
        status.completed_cycles += 1;
    }
}

#[async_trait]
impl MassSnapshotProvider for MassCoordinator {
    fn latest_snapshot(&self) -> Option<Arc<MassSnapshot>> {
        MassCoordinator::latest_snapshot(self)
    }

    async fn request_refresh(&self) -> Result<Arc<MassSnapshot>> {
        self.refresh().await
    }
}

/// Marks the coordinator as refreshing until dropped, including when the
/// refresh future is cancelled mid-cycle.
struct PhaseGuard<'a> {
    phase: &'a RwLock<RefreshPhase>,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a RwLock<RefreshPhase>) -> Self {
        *phase.write() = RefreshPhase::Refreshing;
        Self { phase }
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        *self.phase.write() = RefreshPhase::Idle;
    }
}
