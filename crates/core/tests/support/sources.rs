use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeZone;
use messesinfo_core::{FetchRequest, MassFetcher, MassParser, RawPayload};
use messesinfo_domain::constants::MASS_TIMEZONE;
use messesinfo_domain::{DayKey, Mass, MessesError, Result};

#[derive(Debug, Clone)]
pub enum Failure {
    Error(MessesError),
    /// Never answers within the scraper timeout.
    Stall,
}

/// Per-day fetcher that echoes the requested day and can fail on a chosen call.
#[derive(Default)]
pub struct ScriptedFetcher {
    calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
    failures: Mutex<HashMap<usize, Failure>>,
    latency: Option<Duration>,
}

impl ScriptedFetcher {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency: Some(latency), ..Default::default() }
    }

    /// Make the `call`-th fetch (1-based, counted over the fetcher's life) fail.
    pub fn fail_on(&self, call: usize, failure: Failure) {
        self.failures.lock().unwrap().insert(call, failure);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MassFetcher for ScriptedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<RawPayload> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let failure = self.failures.lock().unwrap().remove(&call);
        match failure {
            Some(Failure::Error(err)) => Err(err),
            Some(Failure::Stall) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(MessesError::Internal("stall elapsed".into()))
            }
            None => Ok(RawPayload::Json(serde_json::json!({ "day": request.to_string() }))),
        }
    }
}

/// Turns an echoed day into two masses on that day.
pub struct StubParser;

impl MassParser for StubParser {
    fn parse(&self, payload: RawPayload) -> Result<Vec<Mass>> {
        let RawPayload::Json(value) = payload else {
            return Err(MessesError::Parse("expected json payload".into()));
        };
        let raw = value["day"].as_str().ok_or_else(|| MessesError::Parse("missing day".into()))?;
        let day = DayKey::parse(raw)?.date();

        [(9, "Laudes"), (18, "Messe")]
            .into_iter()
            .map(|(hour, kind)| {
                let start = MASS_TIMEZONE
                    .from_local_datetime(&day.and_hms_opt(hour, 30, 0).unwrap())
                    .single()
                    .unwrap();
                Mass::new(start, chrono::Duration::hours(1), kind)
            })
            .collect()
    }
}
