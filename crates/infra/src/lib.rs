//! # messes.info Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading (environment variables, JSON/TOML files)
//! - HTTP client implementation
//! - messes.info integration (JSON-RPC and schedule page sources)
//! - Refresh scheduler and refresh metrics
//!
//! ## Architecture
//! - Implements traits defined in `messesinfo-core`
//! - Depends on `messesinfo-domain` and `messesinfo-core`
//! - Contains all "impure" code (network I/O, timers, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;
pub mod scheduling;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
pub use integrations::messes_info::{create_source, ChurchQuery, HtmlFetcher, HtmlMassParser, RpcFetcher, RpcMassParser};
pub use observability::metrics::RefreshMetrics;
pub use scheduling::{RefreshScheduler, RefreshSchedulerConfig, SchedulerError};
