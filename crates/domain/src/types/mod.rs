//! Domain types and models
//!
//! Mass records, the community they belong to, the calendar-day buckets the
//! scraper fills, and the snapshot the coordinator publishes.

pub mod calendar;
pub mod day_key;
pub mod mass;
pub mod snapshot;
pub mod status;

pub use calendar::CalendarEvent;
pub use day_key::DayKey;
pub use mass::{Community, Mass};
pub use snapshot::{DayBuckets, MassSnapshot};
pub use status::{CoordinatorStatus, RefreshPhase};
