//! Presentation adapters over the mass coordinator

mod calendar;
mod sensor;

pub use calendar::*;
pub use sensor::*;
