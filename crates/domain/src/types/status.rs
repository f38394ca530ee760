//! Coordinator lifecycle state exposed to adapters and logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPhase {
    #[default]
    Idle,
    Refreshing,
}

impl_domain_status_conversions!(RefreshPhase {
    Idle => "idle",
    Refreshing => "refreshing",
});

/// Outcome bookkeeping of the most recent refresh attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CoordinatorStatus {
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    /// Message of the failure that ended the last cycle, cleared on success.
    pub last_error: Option<String>,
    pub last_update_success: bool,
    pub completed_cycles: u64,
}
