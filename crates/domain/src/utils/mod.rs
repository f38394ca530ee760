//! Utility functions for domain logic

pub mod mass_time;
