//! Shared test helpers for `messesinfo-core` integration tests.
//!
//! Scripted fetchers and a stub parser so coordinator tests can focus on
//! cycle behaviour instead of payload fixtures.

#![allow(dead_code)]

pub mod sources;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use messesinfo_core::{MassCoordinator, MassScraper, MockClock};

pub use sources::{Failure, ScriptedFetcher, StubParser};

/// Friday 15 March 2024, 08:00 UTC.
pub fn clock() -> Arc<MockClock> {
    Arc::new(MockClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()))
}

pub fn coordinator(fetcher: Arc<ScriptedFetcher>, clock: Arc<MockClock>, days_ahead: u32) -> MassCoordinator {
    let scraper = MassScraper::new(fetcher, Arc::new(StubParser), clock);
    MassCoordinator::new("Masses for Saint Roch (75001)", scraper, days_ahead)
}
