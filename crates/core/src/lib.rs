//! # Messes Info Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for fetching and parsing mass listings
//! - The day-bucket cache and the incremental scraper
//! - The refresh coordinator that publishes snapshots
//!
//! ## Architecture Principles
//! - Only depends on `messesinfo-domain`
//! - No HTTP, file or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod clock_ports;
pub mod coordination;
pub mod scraping;

// Re-export specific items to avoid ambiguity
pub use clock_ports::{Clock, MockClock, SystemClock};
pub use coordination::ports::MassSnapshotProvider;
pub use coordination::MassCoordinator;
pub use scraping::cache::DayBucketCache;
pub use scraping::ports::{FetchGranularity, FetchRequest, MassFetcher, MassParser, RawPayload};
pub use scraping::MassScraper;
