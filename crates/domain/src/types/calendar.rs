use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use super::Mass;

/// Calendar entry rendered from a [`Mass`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub summary: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl From<&Mass> for CalendarEvent {
    fn from(mass: &Mass) -> Self {
        let community = mass.community.as_deref();
        Self {
            start: mass.start_date,
            end: mass.end_date,
            summary: mass.summary(),
            location: community.map(|c| c.address_line()).filter(|l| !l.is_empty()),
            description: community.map(|c| c.name.clone()),
        }
    }
}
