//! Port interfaces for mass scraping
//!
//! These traits define the boundaries between core business logic
//! and the messes.info adapters in the infrastructure layer.

use async_trait::async_trait;
use messesinfo_domain::{DayKey, Mass, Result};

/// Undecoded response body handed from a fetcher to its parser.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Html(String),
    Json(serde_json::Value),
}

/// How many days a single fetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchGranularity {
    /// One request per calendar day.
    PerDay,
    /// One request returns a multi-day listing.
    Listing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Day(DayKey),
    Range { start: DayKey, days: u32 },
}

impl std::fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{day}"),
            Self::Range { start, days } => write!(f, "{start} (+{days} days)"),
        }
    }
}

/// Trait for retrieving raw listings from the remote endpoint
///
/// Implementations perform exactly one outbound request per call and never
/// retry.
#[async_trait]
pub trait MassFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<RawPayload>;

    fn granularity(&self) -> FetchGranularity {
        FetchGranularity::PerDay
    }
}

/// Trait for decoding a raw payload into masses
///
/// Must be deterministic: the same payload always yields the same masses in
/// the same order.
pub trait MassParser: Send + Sync {
    fn parse(&self, payload: RawPayload) -> Result<Vec<Mass>>;
}
