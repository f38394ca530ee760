//! Read side of the coordinator as seen by presentation adapters.

use std::sync::Arc;

use async_trait::async_trait;
use messesinfo_domain::{MassSnapshot, Result};

/// Trait for consumers that display the latest published masses
#[async_trait]
pub trait MassSnapshotProvider: Send + Sync {
    /// The last successful snapshot, if any refresh has succeeded yet.
    fn latest_snapshot(&self) -> Option<Arc<MassSnapshot>>;

    /// Ask for a refresh. Joins a cycle already in flight instead of
    /// starting another one.
    async fn request_refresh(&self) -> Result<Arc<MassSnapshot>>;
}
