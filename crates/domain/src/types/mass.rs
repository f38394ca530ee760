//! Mass records and the community (parish location) they belong to.

use std::sync::Arc;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::DayKey;
use crate::errors::{MessesError, Result};

/// Parish or location record shared by consecutive masses in a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Community {
    pub name: String,
    pub street_address: String,
    pub postal_code: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diocese: Option<String>,
}

impl Community {
    /// `<street>, <postal>, <city>`, skipping empty parts.
    pub fn address_line(&self) -> String {
        [self.street_address.as_str(), self.postal_code.as_str(), self.city.as_str()]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One scheduled mass.
///
/// `end_date` is always strictly after `start_date`; [`Mass::new`] rejects
/// non-positive durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mass {
    pub start_date: DateTime<Tz>,
    pub end_date: DateTime<Tz>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub community: Option<Arc<Community>>,
}

impl Mass {
    pub fn new(start_date: DateTime<Tz>, duration: Duration, kind: impl Into<String>) -> Result<Self> {
        if duration <= Duration::zero() {
            return Err(MessesError::Parse(format!(
                "mass duration must be positive, got {} minutes",
                duration.num_minutes()
            )));
        }
        let end_date = start_date.checked_add_signed(duration).ok_or_else(|| {
            MessesError::Parse(format!(
                "mass duration of {} hours overflows its end date",
                duration.num_hours()
            ))
        })?;
        Ok(Self {
            start_date,
            end_date,
            kind: kind.into(),
            subtitle: None,
            picture: None,
            info: None,
            community: None,
        })
    }

    pub fn with_community(mut self, community: Option<Arc<Community>>) -> Self {
        self.community = community;
        self
    }

    pub fn with_subtitle(mut self, subtitle: Option<String>) -> Self {
        self.subtitle = subtitle.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_info(mut self, info: Option<String>) -> Self {
        self.info = info.filter(|s| !s.trim().is_empty());
        self
    }

    /// Calendar day the mass starts on, in its own timezone.
    pub fn day_key(&self) -> DayKey {
        DayKey::new(self.start_date.date_naive())
    }

    /// Human-readable title: the kind, followed by the subtitle in parentheses
    /// when one is known.
    pub fn summary(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!("{} ({})", self.kind, subtitle),
            None => self.kind.clone(),
        }
    }

    pub fn community_name(&self) -> &str {
        self.community.as_deref().map(|c| c.name.as_str()).unwrap_or_default()
    }

    /// Identity used to drop duplicate listings of the same mass.
    pub fn dedup_key(&self) -> (DateTime<Tz>, String, String) {
        (self.start_date, self.kind.clone(), self.community_name().to_string())
    }
}
