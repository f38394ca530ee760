//! Refresh coordination and snapshot publication

pub mod ports;
pub mod service;

pub use service::MassCoordinator;
