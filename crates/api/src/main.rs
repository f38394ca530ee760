//! messesinfo - mass schedule tracker for one church
//!
//! Runs the first refresh, keeps the schedule fresh in the background and
//! exits on Ctrl-C.

use anyhow::Context;
use messesinfo_infra::config;
use messesinfo_lib::utils::logging::{error_label, init_tracing};
use messesinfo_lib::AppContext;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "could not load .env file"),
    }

    let config = config::load().context("loading configuration")?;
    info!(title = %config.entry_title(), source = %config.scraper.source, "configuration loaded");

    let ctx = AppContext::new(config).context("building application context")?;
    let snapshot = match ctx.start().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!(error = %err, label = error_label(&err), "setup failed, first refresh did not succeed");
            return Err(err).context("first refresh");
        }
    };

    let calendar = ctx.calendar();
    let sensor = ctx.sensor();
    info!(
        calendar = calendar.name(),
        sensor = sensor.name(),
        masses = snapshot.total_masses(),
        days = snapshot.day_count(),
        "tracking masses"
    );
    if let Some(next) = calendar.event(chrono::Utc::now()) {
        info!(start = %next.start, summary = %next.summary, location = ?next.location, "next mass");
    }

    tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
    info!(
        cycles = ctx.metrics.get_cycle_count(),
        failures = ctx.metrics.get_failure_count(),
        "shutting down"
    );

    ctx.shutdown().await.context("shutting down")?;
    Ok(())
}
