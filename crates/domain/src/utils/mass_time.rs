//! Date, time and duration parsing for mass listings.
//!
//! Everything is localized to Europe/Paris. Output depends only on the input
//! strings, never on the wall clock.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::constants::{DEFAULT_MASS_DURATION_MINUTES, MASS_TIMEZONE, RPC_START_FORMAT};
use crate::errors::{MessesError, Result};

const MICRODATA_NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a `"<h>h<m>"` length such as `"1h30"` or `"0H45"`.
///
/// A missing, blank or zero length yields the one-hour default.
pub fn parse_mass_length(raw: Option<&str>) -> Result<Duration> {
    let default = Duration::minutes(DEFAULT_MASS_DURATION_MINUTES);
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };

    let lowered = raw.to_lowercase();
    let (hours, minutes) = lowered
        .split_once('h')
        .ok_or_else(|| MessesError::Parse(format!("invalid mass length '{raw}'")))?;
    let hours = parse_component(hours, raw)?;
    let minutes = if minutes.trim().is_empty() { 0 } else { parse_component(minutes, raw)? };

    let total = Duration::try_hours(hours)
        .zip(Duration::try_minutes(minutes))
        .and_then(|(hours, minutes)| hours.checked_add(&minutes))
        .ok_or_else(|| MessesError::Parse(format!("mass length '{raw}' is out of range")))?;
    if total <= Duration::zero() {
        return Ok(default);
    }
    Ok(total)
}

fn parse_component(part: &str, raw: &str) -> Result<i64> {
    part.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| MessesError::Parse(format!("invalid mass length '{raw}'")))
}

/// Combine a `YYYY-MM-DD` date and a `HHhMM` time into a Paris instant.
pub fn parse_mass_start(date: &str, time: &str) -> Result<DateTime<Tz>> {
    let combined = format!("{} {}", date.trim(), time.trim().to_lowercase());
    let naive = NaiveDateTime::parse_from_str(&combined, RPC_START_FORMAT)
        .map_err(|e| MessesError::Parse(format!("invalid mass start '{combined}': {e}")))?;
    localize(naive)
}

/// Parse a microdata `startDate`, with or without an explicit offset.
pub fn parse_microdata_start(raw: &str) -> Result<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&MASS_TIMEZONE));
    }
    MICRODATA_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| MessesError::Parse(format!("invalid startDate '{raw}'")))
        .and_then(localize)
}

fn localize(naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    MASS_TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| MessesError::Parse(format!("local time {naive} does not exist in {MASS_TIMEZONE}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_plus_length_lands_in_same_timezone() {
        let start = parse_mass_start("2024-03-10", "11h30").unwrap();
        let end = start + parse_mass_length(Some("1h30")).unwrap();

        assert_eq!(end, MASS_TIMEZONE.with_ymd_and_hms(2024, 3, 10, 13, 0, 0).unwrap());
        assert_eq!(end.timezone(), MASS_TIMEZONE);
    }

    #[test]
    fn length_is_case_insensitive() {
        assert_eq!(parse_mass_length(Some("0H45")).unwrap(), Duration::minutes(45));
        assert_eq!(parse_mass_length(Some("2h")).unwrap(), Duration::hours(2));
    }

    #[test]
    fn missing_or_zero_length_defaults_to_one_hour() {
        assert_eq!(parse_mass_length(None).unwrap(), Duration::hours(1));
        assert_eq!(parse_mass_length(Some(" ")).unwrap(), Duration::hours(1));
        assert_eq!(parse_mass_length(Some("0h00")).unwrap(), Duration::hours(1));
    }

    #[test]
    fn malformed_length_is_a_parse_error() {
        assert!(matches!(parse_mass_length(Some("90")), Err(MessesError::Parse(_))));
        assert!(matches!(parse_mass_length(Some("ah30")), Err(MessesError::Parse(_))));
    }

    #[test]
    fn oversized_length_is_a_parse_error() {
        let err = parse_mass_length(Some("99999999999999999h")).unwrap_err();
        assert!(matches!(err, MessesError::Parse(ref msg) if msg.contains("out of range")));
        assert!(matches!(parse_mass_length(Some("0h99999999999999999")), Err(MessesError::Parse(_))));
    }

    #[test]
    fn uppercase_time_separator_is_accepted() {
        let start = parse_mass_start("2024-07-14", "09H00").unwrap();
        assert_eq!(start, MASS_TIMEZONE.with_ymd_and_hms(2024, 7, 14, 9, 0, 0).unwrap());
    }

    #[test]
    fn nonexistent_local_time_is_rejected() {
        // Clocks jump from 02:00 to 03:00 on this date.
        assert!(matches!(parse_mass_start("2024-03-31", "02h30"), Err(MessesError::Parse(_))));
    }

    #[test]
    fn microdata_start_accepts_offset_and_naive_forms() {
        let expected = MASS_TIMEZONE.with_ymd_and_hms(2024, 3, 10, 18, 30, 0).unwrap();
        assert_eq!(parse_microdata_start("2024-03-10T18:30:00+01:00").unwrap(), expected);
        assert_eq!(parse_microdata_start("2024-03-10T18:30").unwrap(), expected);
        assert!(parse_microdata_start("dimanche").is_err());
    }
}
