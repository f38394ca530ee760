//! Scheduling infrastructure for periodic refreshes
//!
//! The refresh scheduler follows the runtime rules used across this crate:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on every cycle
//! - Structured tracing with RefreshMetrics integration

pub mod error;
pub mod refresh_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use refresh_scheduler::{RefreshScheduler, RefreshSchedulerConfig};
