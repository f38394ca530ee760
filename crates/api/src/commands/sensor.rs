//! Sensor presentation: mass count plus the full schedule as attributes

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use messesinfo_core::MassCoordinator;
use messesinfo_domain::{Config, DayKey, Mass, Result};
use serde::Serialize;
use tracing::info;

use crate::utils::logging::log_command_execution;

/// Extra state exposed next to the mass count.
#[derive(Debug, Clone, Serialize)]
pub struct SensorAttributes {
    pub masses: BTreeMap<DayKey, Vec<Mass>>,
}

pub struct MassSensor {
    name: String,
    coordinator: Arc<MassCoordinator>,
}

impl MassSensor {
    pub fn new(config: &Config, coordinator: Arc<MassCoordinator>) -> Self {
        Self { name: config.church.coordinator_name(), coordinator }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of masses in the latest snapshot, `None` before the first success.
    pub fn state(&self) -> Option<usize> {
        self.coordinator.latest_snapshot().map(|snapshot| snapshot.total_masses())
    }

    pub fn attributes(&self) -> Option<SensorAttributes> {
        self.coordinator
            .latest_snapshot()
            .map(|snapshot| SensorAttributes { masses: snapshot.buckets.clone() })
    }

    /// Ask the coordinator for a refresh; concurrent callers share one cycle.
    pub async fn update(&self) -> Result<usize> {
        let command_name = "sensor::update";
        let started = Instant::now();

        let result = self.coordinator.refresh().await.map(|snapshot| snapshot.total_masses());
        log_command_execution(command_name, started.elapsed(), result.is_ok());

        if let Ok(count) = &result {
            info!(sensor = %self.name, masses = count, "sensor updated");
        }
        result
    }
}
