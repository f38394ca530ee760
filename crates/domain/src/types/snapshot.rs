use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{DayKey, Mass};

/// Masses grouped by the calendar day they start on.
pub type DayBuckets = BTreeMap<DayKey, Vec<Mass>>;

/// Last successful refresh as seen by presentation adapters.
///
/// Published whole; readers never observe a half-merged cache.
#[derive(Debug, Clone, Serialize)]
pub struct MassSnapshot {
    pub buckets: DayBuckets,
    pub last_success: DateTime<Utc>,
    /// Number of the refresh cycle that produced this snapshot.
    pub cycle: u64,
}

impl MassSnapshot {
    pub fn total_masses(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// All masses in chronological order across buckets.
    pub fn masses(&self) -> impl Iterator<Item = &Mass> {
        self.buckets.values().flatten()
    }

    pub fn day_count(&self) -> usize {
        self.buckets.len()
    }
}
