//! Metrics collection modules
//!
//! Thread-safe metrics for the refresh pipeline.

pub mod refresh;

// Re-export metric types for convenience
pub use refresh::RefreshMetrics;
