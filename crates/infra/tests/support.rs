//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use messesinfo_core::MockClock;
use messesinfo_domain::{ChurchConfig, Config, CoordinatorConfig, ScraperConfig, SourceKind};
use serde_json::{json, Value};

pub const API_KEY: &str = "test-capability-key";

/// Sunday 10 March 2024, 08:00 UTC.
pub fn clock() -> Arc<MockClock> {
    Arc::new(MockClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()))
}

pub fn config(base_url: &str, source: SourceKind) -> Config {
    Config {
        church: ChurchConfig {
            name: "Saint Roch".into(),
            postal_code: "75001".into(),
            city: "Paris".into(),
        },
        scraper: ScraperConfig {
            base_url: base_url.to_string(),
            api_key: Some(API_KEY.to_string()),
            source,
            ..ScraperConfig::default()
        },
        coordinator: CoordinatorConfig { days_ahead: 2, ..CoordinatorConfig::default() },
    }
}

/// `gwtRequest` response with one community followed by its celebrations.
pub fn rpc_day(date: &str, times: &[&str]) -> Value {
    let mut objects = vec![json!({"P": {
        "community": true,
        "name": "Saint-Roch",
        "address": "296 rue Saint-Honoré",
        "zipcode": "75001",
        "city": "Paris",
        "latitude": "48.8653",
        "longitude": 2.3319,
    }})];
    objects.extend(times.iter().map(|time| {
        json!({"P": {"celebrationInfoId": format!("{date}-{time}"), "date": date, "time": time, "length": "1h"}})
    }));
    json!({ "S": vec![true; objects.len()], "O": objects })
}

pub fn html_event(title: &str, start: &str) -> String {
    format!(
        r#"<div itemscope itemtype="http://schema.org/Event">
            <span itemprop="name">{title}</span>
            <time itemprop="startDate" datetime="{start}">{start}</time>
            <div itemprop="location" itemscope itemtype="http://schema.org/Place">
                <span itemprop="name">Saint-Roch</span>
                <div itemprop="address" itemscope itemtype="http://schema.org/PostalAddress">
                    <span itemprop="streetAddress">296 rue Saint-Honoré</span>
                    <span itemprop="postalCode">75001</span>
                    <span itemprop="addressLocality">Paris</span>
                </div>
            </div>
        </div>"#
    )
}

pub fn html_page(events: &[String]) -> String {
    format!("<!DOCTYPE html><html><body><section>{}</section></body></html>", events.concat())
}
