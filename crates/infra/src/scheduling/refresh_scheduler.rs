//! Refresh scheduler for periodic mass schedule updates.
//!
//! Sleeps for the configured interval, then asks the coordinator for a
//! refresh. Each cycle is bounded by a timeout; a failed or timed-out cycle is
//! only logged, and the next tick is the retry. Stopping the scheduler is the
//! only way a pending request gets cancelled.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use messesinfo_core::MassSnapshotProvider;
//! use messesinfo_infra::observability::metrics::RefreshMetrics;
//! use messesinfo_infra::scheduling::{RefreshScheduler, RefreshSchedulerConfig};
//!
//! # async fn example(coordinator: Arc<dyn MassSnapshotProvider>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut scheduler = RefreshScheduler::new(
//!     coordinator,
//!     RefreshSchedulerConfig::new(Duration::from_secs(12 * 3600), Duration::from_secs(90)),
//!     Arc::new(RefreshMetrics::new()),
//! );
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use messesinfo_core::MassSnapshotProvider;
use messesinfo_domain::Config;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::observability::metrics::RefreshMetrics;
use crate::observability::MetricsResult;
use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the refresh scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSchedulerConfig {
    /// Delay between refresh cycles
    pub interval: Duration,
    /// Upper bound for one whole cycle
    pub cycle_timeout: Duration,
}

impl RefreshSchedulerConfig {
    pub fn new(interval: Duration, cycle_timeout: Duration) -> Self {
        Self { interval, cycle_timeout }
    }

    /// Interval from the coordinator settings; the cycle may spend one
    /// request timeout per day of the window, plus one.
    pub fn from_config(config: &Config) -> Self {
        let requests = config.coordinator.days_ahead.saturating_add(1);
        Self {
            interval: config.coordinator.update_interval(),
            cycle_timeout: config.scraper.request_timeout().saturating_mul(requests),
        }
    }
}

/// Refresh scheduler driving one coordinator
pub struct RefreshScheduler {
    coordinator: Arc<dyn MassSnapshotProvider>,
    config: RefreshSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
    metrics: Arc<RefreshMetrics>,
}

impl RefreshScheduler {
    pub fn new(
        coordinator: Arc<dyn MassSnapshotProvider>,
        config: RefreshSchedulerConfig,
        metrics: Arc<RefreshMetrics>,
    ) -> Self {
        Self {
            coordinator,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
            metrics,
        }
    }

    /// Spawn the background refresh loop.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyRunning`] if the loop is active.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!(interval_secs = self.config.interval.as_secs(), "Starting refresh scheduler");

        // Fresh token so the scheduler can be restarted after stop
        self.cancellation_token = CancellationToken::new();

        let coordinator = Arc::clone(&self.coordinator);
        let metrics = Arc::clone(&self.metrics);
        let config = self.config.clone();
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::refresh_loop(coordinator, metrics, config, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);

        info!("Refresh scheduler started");
        Ok(())
    }

    /// Cancel the loop, including any refresh in flight, and wait for it.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotRunning`] if the loop is not active.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        info!("Stopping refresh scheduler");
        self.cancellation_token.cancel();

        if let Some(handle) = self.task_handle.lock().await.take() {
            tokio::time::timeout(JOIN_TIMEOUT, handle)
                .await
                .map_err(|_| SchedulerError::Timeout { seconds: JOIN_TIMEOUT.as_secs() })?
                .map_err(|err| SchedulerError::TaskJoinFailed(err.to_string()))?;
        }

        info!("Refresh scheduler stopped");
        Ok(())
    }

    /// Whether the background task exists and has not finished.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    async fn refresh_loop(
        coordinator: Arc<dyn MassSnapshotProvider>,
        metrics: Arc<RefreshMetrics>,
        config: RefreshSchedulerConfig,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Refresh loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(config.interval) => {
                    log_metric(metrics.record_tick(), "scheduler.refresh.tick");
                    let started = Instant::now();

                    tokio::select! {
                        _ = cancel.cancelled() => {
                            debug!("Refresh cancelled mid-cycle");
                            break;
                        }
                        outcome = tokio::time::timeout(config.cycle_timeout, coordinator.request_refresh()) => {
                            match outcome {
                                Ok(Ok(snapshot)) => {
                                    debug!(cycle = snapshot.cycle, masses = snapshot.total_masses(), "Scheduled refresh completed");
                                }
                                Ok(Err(err)) => {
                                    warn!(error = %err, "Scheduled refresh failed; keeping previous snapshot");
                                    log_metric(metrics.record_failure(), "scheduler.refresh.failure");
                                }
                                Err(_) => {
                                    warn!(timeout_secs = config.cycle_timeout.as_secs(), "Scheduled refresh timed out");
                                    log_metric(metrics.record_timeout(), "scheduler.refresh.timeout");
                                }
                            }
                            log_metric(metrics.record_cycle(started.elapsed()), "scheduler.refresh.duration");
                        }
                    }
                }
            }
        }
    }
}

fn log_metric(result: MetricsResult<()>, metric: &'static str) {
    if let Err(err) = result {
        warn!(metric = metric, error = ?err, "Failed to record scheduler metric");
    }
}

/// Ensure scheduler is stopped when dropped
impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if !self.cancellation_token.is_cancelled() {
            debug!("RefreshScheduler dropped; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
