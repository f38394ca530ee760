//! Calendar-day key used to partition scraped masses.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DAY_KEY_FORMAT;
use crate::errors::{MessesError, Result};

/// A calendar day, rendered as `dd-mm-yyyy`.
///
/// Ordering follows the calendar, not the string form, so a `BTreeMap`
/// keyed by `DayKey` iterates chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parse a `dd-mm-yyyy` key.
    pub fn parse(raw: &str) -> Result<Self> {
        NaiveDate::parse_from_str(raw.trim(), DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|e| MessesError::Parse(format!("invalid day key '{raw}': {e}")))
    }

    /// The `count` consecutive days starting at `start` (inclusive).
    pub fn window(start: NaiveDate, count: u32) -> Vec<DayKey> {
        start.iter_days().take(count as usize).map(Self).collect()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = MessesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
