//! Incremental scraping of mass listings into day buckets

pub mod cache;
pub mod ports;
pub mod service;

pub use cache::DayBucketCache;
pub use service::MassScraper;
