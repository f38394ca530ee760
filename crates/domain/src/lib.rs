//! # Messes Info Domain
//!
//! Business domain types and models for the mass schedule integration.
//!
//! This crate contains:
//! - Mass, community and day-bucket types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and time helpers
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::mass_time::{parse_mass_length, parse_mass_start, parse_microdata_start};
