//! Shared helpers for app integration tests: a mocked messes.info server
//! and a context pinned to Sunday 10 March 2024.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use messesinfo_core::MockClock;
use messesinfo_domain::{ChurchConfig, Config, CoordinatorConfig, ScraperConfig, SourceKind};
use messesinfo_lib::AppContext;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn config(base_url: &str) -> Config {
    Config {
        church: ChurchConfig { name: "Saint Roch".into(), postal_code: "75001".into(), city: "Paris".into() },
        scraper: ScraperConfig {
            base_url: base_url.to_string(),
            api_key: Some("test-capability-key".into()),
            source: SourceKind::Rpc,
            request_timeout_secs: 2,
            ..ScraperConfig::default()
        },
        coordinator: CoordinatorConfig { days_ahead: 2, ..CoordinatorConfig::default() },
    }
}

/// 08:00 UTC, 09:00 in Paris.
pub fn clock() -> Arc<MockClock> {
    Arc::new(MockClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()))
}

pub fn context(server: &MockServer) -> AppContext {
    AppContext::with_clock(config(&server.uri()), clock()).expect("context should build")
}

fn rpc_day(date: &str, celebrations: &[(&str, Option<&str>)]) -> Value {
    let mut objects = vec![json!({"P": {
        "community": true,
        "name": "Saint-Roch",
        "address": "296 rue Saint-Honoré",
        "zipcode": "75001",
        "city": "Paris",
        "latitude": 48.8653,
        "longitude": 2.3319,
    }})];
    for (time, kind) in celebrations {
        let mut props = json!({"celebrationInfoId": format!("{date}-{time}"), "date": date, "time": time});
        if let Some(kind) = kind {
            props["type"] = json!(kind);
        }
        objects.push(json!({ "P": props }));
    }
    json!({ "S": vec![true; objects.len()], "O": objects })
}

/// Sunday: 08h30 Laudes, 11h00 Messe, 18h30 Messe. Monday: 12h15 Messe.
pub async fn mount_schedule(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/gwtRequest"))
        .and(body_string_contains("10-03-2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_day(
            "2024-03-10",
            &[("08h30", Some("Laudes")), ("11h00", Some("Messe")), ("18h30", None)],
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/gwtRequest"))
        .and(body_string_contains("11-03-2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_day("2024-03-11", &[("12h15", None)])))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_outage(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/gwtRequest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}
