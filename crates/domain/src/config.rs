//! Configuration structures
//!
//! Plain data with serde defaults; loading from the environment or from
//! files lives in the infrastructure layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_DAYS_AHEAD, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETENTION_DAYS, DEFAULT_UPDATE_INTERVAL_HOURS, MAX_DAYS_AHEAD, MAX_RETENTION_DAYS,
    MAX_UPDATE_INTERVAL_HOURS,
};
use crate::errors::{MessesError, Result};
use crate::impl_domain_status_conversions;

/// Complete runtime configuration for one tracked church.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub church: ChurchConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.church.name.trim().is_empty() {
            return Err(MessesError::Config("church name must not be empty".into()));
        }
        if self.church.postal_code.trim().is_empty() {
            return Err(MessesError::Config("postal code must not be empty".into()));
        }
        let coordinator = &self.coordinator;
        if !(1..=MAX_UPDATE_INTERVAL_HOURS).contains(&coordinator.update_interval_hours) {
            return Err(MessesError::Config(format!(
                "update interval must be between 1 and {MAX_UPDATE_INTERVAL_HOURS} hours"
            )));
        }
        if !(1..=MAX_DAYS_AHEAD).contains(&coordinator.days_ahead) {
            return Err(MessesError::Config(format!("days ahead must be between 1 and {MAX_DAYS_AHEAD}")));
        }
        if coordinator.retention_days > MAX_RETENTION_DAYS {
            return Err(MessesError::Config(format!("retention days must not exceed {MAX_RETENTION_DAYS}")));
        }
        if self.scraper.request_timeout_secs == 0 {
            return Err(MessesError::Config("request timeout must be at least one second".into()));
        }
        if self.scraper.base_url.trim().is_empty() {
            return Err(MessesError::Config("base url must not be empty".into()));
        }
        if self.scraper.source == SourceKind::Rpc
            && self.scraper.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(MessesError::Config("api key is required for the rpc source".into()));
        }
        Ok(())
    }

    /// Title shown for the configured entry.
    pub fn entry_title(&self) -> String {
        format!(
            "Messes infos for {} ({}, {})",
            self.church.name, self.church.postal_code, self.church.city
        )
    }

    /// Whether `other` tracks the same church over the same window.
    pub fn matches(&self, other: &Config) -> bool {
        self.coordinator.days_ahead == other.coordinator.days_ahead
            && self.church.city == other.church.city
            && self.church.postal_code == other.church.postal_code
            && self.church.name == other.church.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchConfig {
    pub name: String,
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
}

impl ChurchConfig {
    /// Two-digit département prefix of the postal code.
    pub fn short_postal_code(&self) -> &str {
        let code = self.postal_code.trim();
        code.char_indices().nth(2).map_or(code, |(idx, _)| &code[..idx])
    }

    pub fn calendar_name(&self) -> String {
        format!("Messes {} [{}]", self.name, self.postal_code)
    }

    pub fn calendar_unique_id(&self) -> String {
        format!("messe_info_{}_{}", self.postal_code, self.name.to_lowercase().replace(' ', "_"))
    }

    /// Name used by the coordinator and the sensor.
    pub fn coordinator_name(&self) -> String {
        format!("Masses for {} ({})", self.name, self.postal_code)
    }
}

/// Which messes.info surface to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// JSON-RPC endpoint, one request per day.
    #[default]
    Rpc,
    /// Public schedule page, one multi-day listing.
    Html,
}

impl_domain_status_conversions!(SourceKind {
    Rpc => "rpc",
    Html => "html",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub source: SourceKind,
    pub request_timeout_secs: u64,
    pub page_size: u32,
}

impl ScraperConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            source: SourceKind::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub update_interval_hours: u64,
    pub days_ahead: u32,
    /// Days before today whose buckets survive eviction.
    pub retention_days: u32,
}

impl CoordinatorConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_hours.saturating_mul(3600))
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            update_interval_hours: DEFAULT_UPDATE_INTERVAL_HOURS,
            days_ahead: DEFAULT_DAYS_AHEAD,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}
