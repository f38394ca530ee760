//! Application context - dependency injection container

use std::sync::Arc;

use messesinfo_core::{Clock, MassCoordinator, MassScraper, MassSnapshotProvider, SystemClock};
use messesinfo_domain::{Config, MassSnapshot, MessesError, Result};
use messesinfo_infra::{create_source, HttpClient, RefreshMetrics, RefreshScheduler, RefreshSchedulerConfig};
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::commands::{MassCalendar, MassSensor};

/// Application context - holds the coordinator and its scheduler
pub struct AppContext {
    pub config: Config,
    pub coordinator: Arc<MassCoordinator>,
    pub metrics: Arc<RefreshMetrics>,
    scheduler: Mutex<RefreshScheduler>,
}

impl AppContext {
    /// Wire the HTTP client, source, scraper, coordinator and scheduler.
    ///
    /// Nothing is fetched until [`AppContext::start`].
    pub fn new(config: Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same as [`AppContext::new`] with an explicit clock.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let http_client = HttpClient::builder().timeout(config.scraper.request_timeout()).build()?;
        let (fetcher, parser) = create_source(&config, http_client)?;
        let scraper = MassScraper::new(fetcher, parser, clock)
            .with_fetch_timeout(config.scraper.request_timeout());

        let coordinator = Arc::new(
            MassCoordinator::new(config.church.coordinator_name(), scraper, config.coordinator.days_ahead)
                .with_retention_days(config.coordinator.retention_days),
        );

        let metrics = Arc::new(RefreshMetrics::new());
        let provider: Arc<dyn MassSnapshotProvider> = coordinator.clone();
        let scheduler =
            RefreshScheduler::new(provider, RefreshSchedulerConfig::from_config(&config), Arc::clone(&metrics));

        info!(
            coordinator = coordinator.name(),
            source = %config.scraper.source,
            days_ahead = config.coordinator.days_ahead,
            "application context created"
        );

        Ok(Self { config, coordinator, metrics, scheduler: Mutex::new(scheduler) })
    }

    /// Run the first refresh, then start the periodic scheduler.
    ///
    /// A failing first refresh fails setup and leaves the scheduler stopped,
    /// so the host can retry setup later.
    #[instrument(skip(self), fields(coordinator = self.coordinator.name()))]
    pub async fn start(&self) -> Result<Arc<MassSnapshot>> {
        let snapshot = self.coordinator.refresh().await.map_err(|err| {
            error!(error = %err, "first refresh failed");
            err
        })?;

        self.scheduler.lock().await.start().await.map_err(MessesError::from)?;
        info!(masses = snapshot.total_masses(), days = snapshot.day_count(), "first refresh complete");
        Ok(snapshot)
    }

    /// Stop the scheduler and drop every cached day.
    ///
    /// Stopping the scheduler is the only way to cancel a pending request.
    #[instrument(skip(self), fields(coordinator = self.coordinator.name()))]
    pub async fn shutdown(&self) -> Result<()> {
        {
            let mut scheduler = self.scheduler.lock().await;
            if scheduler.is_running() {
                scheduler.stop().await.map_err(MessesError::from)?;
            }
        }
        self.coordinator.clear().await;
        info!("application context shut down");
        Ok(())
    }

    pub async fn is_scheduler_running(&self) -> bool {
        self.scheduler.lock().await.is_running()
    }

    pub fn calendar(&self) -> MassCalendar {
        MassCalendar::new(&self.config, Arc::clone(&self.coordinator))
    }

    pub fn sensor(&self) -> MassSensor {
        MassSensor::new(&self.config, Arc::clone(&self.coordinator))
    }
}
