//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use chrono_tz::Tz;

// Remote endpoint
pub const DEFAULT_BASE_URL: &str = "http://egliseinfo.catholique.fr";
pub const RPC_PATH: &str = "/gwtRequest";
pub const HORAIRES_PATH: &str = "/horaires";
pub const RPC_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const RPC_REQUEST_FACTORY: &str = "cef.kephas.shared.request.AppRequestFactory";
pub const RPC_RESULT_PATH: &str = "listCelebrationTime.locality";
pub const RPC_QUERY_SUFFIX: &str = "all-celebration";
pub const DEFAULT_PAGE_SIZE: u32 = 100;

// Request bounds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// Refresh cadence
pub const DEFAULT_UPDATE_INTERVAL_HOURS: u64 = 12;
pub const DEFAULT_DAYS_AHEAD: u32 = 7;
pub const DEFAULT_RETENTION_DAYS: u32 = 1;
pub const MAX_UPDATE_INTERVAL_HOURS: u64 = 24 * 366;
pub const MAX_DAYS_AHEAD: u32 = 366;
pub const MAX_RETENTION_DAYS: u32 = 3660;

// Mass records
pub const DEFAULT_MASS_KIND: &str = "Messe";
pub const DEFAULT_MASS_DURATION_MINUTES: i64 = 60;
pub const DAY_KEY_FORMAT: &str = "%d-%m-%Y";
pub const RPC_START_FORMAT: &str = "%Y-%m-%d %Hh%M";

/// Timezone every mass start date is expressed in.
pub const MASS_TIMEZONE: Tz = chrono_tz::Europe::Paris;
