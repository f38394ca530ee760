//! # messes.info application
//!
//! Composition root and presentation layer.
//!
//! This crate contains:
//! - Application context (dependency injection, lifecycle)
//! - Calendar and sensor adapters over the latest snapshot
//! - Logging setup and the `messesinfo` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
