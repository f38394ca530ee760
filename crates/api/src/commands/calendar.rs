//! Calendar presentation of the latest mass snapshot

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use messesinfo_core::MassCoordinator;
use messesinfo_domain::{CalendarEvent, Config, MessesError, Result};
use tracing::debug;

use crate::utils::logging::log_command_execution;

/// Read-only calendar over one church's masses.
pub struct MassCalendar {
    name: String,
    unique_id: String,
    coordinator: Arc<MassCoordinator>,
}

impl MassCalendar {
    pub fn new(config: &Config, coordinator: Arc<MassCoordinator>) -> Self {
        Self {
            name: config.church.calendar_name(),
            unique_id: config.church.calendar_unique_id(),
            coordinator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Next event starting strictly after `now`.
    pub fn event(&self, now: DateTime<Utc>) -> Option<CalendarEvent> {
        let snapshot = self.coordinator.latest_snapshot()?;
        snapshot
            .masses()
            .filter(|mass| mass.start_date.with_timezone(&Utc) > now)
            .min_by_key(|mass| mass.start_date)
            .map(CalendarEvent::from)
    }

    /// Events starting within `[start, end]`, sorted by start.
    ///
    /// Empty before the first successful refresh.
    pub fn get_events(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<CalendarEvent> {
        let command_name = "calendar::get_events";
        let started = Instant::now();

        let mut events: Vec<CalendarEvent> = self
            .coordinator
            .latest_snapshot()
            .map(|snapshot| {
                snapshot
                    .masses()
                    .filter(|mass| {
                        let begins = mass.start_date.with_timezone(&Utc);
                        start <= begins && begins <= end
                    })
                    .map(CalendarEvent::from)
                    .collect()
            })
            .unwrap_or_default();
        events.sort_by_key(|event| event.start);

        debug!(calendar = %self.name, %start, %end, events = events.len(), "calendar events listed");
        log_command_execution(command_name, started.elapsed(), true);
        events
    }

    pub fn create_event(&self, _event: CalendarEvent) -> Result<()> {
        Err(MessesError::InvalidInput(format!("{} is read-only: events cannot be created", self.name)))
    }

    pub fn delete_event(&self, _start: DateTime<Utc>) -> Result<()> {
        Err(MessesError::InvalidInput(format!("{} is read-only: events cannot be deleted", self.name)))
    }
}
