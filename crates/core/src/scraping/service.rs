//! Mass scraper - walks the day window and fills missing buckets

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use messesinfo_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use messesinfo_domain::{DayBuckets, DayKey, MessesError, Result};
use tracing::{debug, instrument};

use super::ports::{FetchGranularity, FetchRequest, MassFetcher, MassParser, RawPayload};
use crate::clock_ports::Clock;

/// Scraper over one fetcher/parser pair
///
/// Days already present in the caller's cache are never requested again.
/// The first fetch or parse failure aborts the whole pass and nothing is
/// returned for the days that did succeed.
pub struct MassScraper {
    fetcher: Arc<dyn MassFetcher>,
    parser: Arc<dyn MassParser>,
    clock: Arc<dyn Clock>,
    fetch_timeout: Duration,
}

impl MassScraper {
    pub fn new(
        fetcher: Arc<dyn MassFetcher>,
        parser: Arc<dyn MassParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            parser,
            clock,
            fetch_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Upper bound for a single fetch, including body download.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Day keys in `[today, today + days_count)` that still need fetching.
    pub fn pending_days(&self, days_count: u32, already_scraped: &BTreeSet<DayKey>) -> Vec<DayKey> {
        DayKey::window(self.clock.today(), days_count)
            .into_iter()
            .filter(|day| !already_scraped.contains(day))
            .collect()
    }

    #[instrument(skip(self, already_scraped), fields(known = already_scraped.len()))]
    pub async fn scrape(
        &self,
        days_count: u32,
        already_scraped: &BTreeSet<DayKey>,
    ) -> Result<DayBuckets> {
        let pending = self.pending_days(days_count, already_scraped);
        if pending.is_empty() {
            debug!("every day in the window is already cached");
            return Ok(DayBuckets::new());
        }

        match self.fetcher.granularity() {
            FetchGranularity::PerDay => self.scrape_per_day(&pending).await,
            FetchGranularity::Listing => self.scrape_listing(days_count, &pending).await,
        }
    }

    async fn scrape_per_day(&self, pending: &[DayKey]) -> Result<DayBuckets> {
        let mut buckets = DayBuckets::new();
        for day in pending {
            let payload = self.fetch(&FetchRequest::Day(*day)).await?;
            let masses = self.parser.parse(payload)?;
            debug!(day = %day, masses = masses.len(), "day scraped");
            buckets.insert(*day, masses);
        }
        Ok(buckets)
    }

    async fn scrape_listing(&self, days_count: u32, pending: &[DayKey]) -> Result<DayBuckets> {
        let start = DayKey::new(self.clock.today());
        let payload = self.fetch(&FetchRequest::Range { start, days: days_count }).await?;
        let masses = self.parser.parse(payload)?;

        let mut buckets: DayBuckets = pending.iter().map(|day| (*day, Vec::new())).collect();
        for mass in masses {
            if let Some(bucket) = buckets.get_mut(&mass.day_key()) {
                bucket.push(mass);
            }
        }
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(|mass| mass.start_date);
        }
        debug!(days = buckets.len(), "listing scraped");
        Ok(buckets)
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<RawPayload> {
        tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(request)).await.map_err(|_| {
            MessesError::Fetch(format!(
                "request for {request} timed out after {}s",
                self.fetch_timeout.as_secs()
            ))
        })?
    }
}
