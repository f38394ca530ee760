//! Refresh cycle metrics
//!
//! Counts scheduler ticks, completed cycles, failures and timeouts, and keeps
//! the total and last cycle duration in microseconds.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use crate::observability::{MetricsError, MetricsResult};

#[derive(Debug, Default)]
pub struct RefreshMetrics {
    /// Scheduler interval ticks
    pub ticks: AtomicUsize,
    /// Cycles that ran to completion, successful or not
    pub cycles: AtomicUsize,
    pub failures: AtomicUsize,
    /// Cycles abandoned by the scheduler's cycle timeout
    pub timeouts: AtomicUsize,
    pub total_cycle_micros: AtomicU64,
    pub last_cycle_micros: AtomicU64,
}

impl RefreshMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&self) -> MetricsResult<()> {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Record a finished cycle and its duration
    pub fn record_cycle(&self, duration: Duration) -> MetricsResult<()> {
        let micros = u64::try_from(duration.as_micros())
            .map_err(|_| MetricsError::OutOfRange { metric: "refresh.cycle_duration" })?;

        // SeqCst keeps total and count consistent for the average
        self.total_cycle_micros.fetch_add(micros, Ordering::SeqCst);
        self.cycles.fetch_add(1, Ordering::SeqCst);
        self.last_cycle_micros.store(micros, Ordering::Relaxed);
        Ok(())
    }

    pub fn record_failure(&self) -> MetricsResult<()> {
        self.failures.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn record_timeout(&self) -> MetricsResult<()> {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn get_tick_count(&self) -> usize {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn get_cycle_count(&self) -> usize {
        self.cycles.load(Ordering::SeqCst)
    }

    pub fn get_failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn get_timeout_count(&self) -> usize {
        self.timeouts.load(Ordering::Relaxed)
    }

    pub fn get_last_cycle_time_ms(&self) -> u64 {
        self.last_cycle_micros.load(Ordering::Relaxed) / 1_000
    }

    /// Average cycle duration in milliseconds, 0.0 before the first cycle.
    pub fn get_avg_cycle_time_ms(&self) -> f64 {
        let total = self.total_cycle_micros.load(Ordering::SeqCst);
        let count = self.cycles.load(Ordering::SeqCst);

        if count == 0 {
            return 0.0;
        }

        (total as f64 / count as f64) / 1_000.0
    }
}
