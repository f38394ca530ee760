//! Observability infrastructure for refresh metrics
//!
//! Recording a metric never fails the caller's operation: every record
//! method returns `MetricsResult<()>` and callers log the error with `warn!`
//! and carry on.

pub mod metrics;

/// Metrics error type
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetricsError {
    /// A measured duration does not fit the counter's storage
    #[error("Value out of range for metric '{metric}'")]
    OutOfRange {
        /// Metric name that rejected the value
        metric: &'static str,
    },
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
