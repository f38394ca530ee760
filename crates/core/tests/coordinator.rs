//! Refresh cycle behaviour of `MassCoordinator`.

mod support;

use std::sync::Arc;
use std::time::Duration;

use messesinfo_core::{Clock, MassSnapshotProvider};
use messesinfo_domain::{DayKey, MessesError, RefreshPhase};
use support::{Failure, ScriptedFetcher};

fn day(raw: &str) -> DayKey {
    DayKey::parse(raw).unwrap()
}

#[tokio::test(start_paused = true)]
async fn concurrent_refreshes_share_one_cycle() {
    let fetcher = Arc::new(ScriptedFetcher::with_latency(Duration::from_millis(200)));
    let coordinator = support::coordinator(fetcher.clone(), support::clock(), 3);

    let (first, second) = tokio::join!(coordinator.refresh(), coordinator.request_refresh());
    let (first, second) = (first.unwrap(), second.unwrap());

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(first.cycle, 1);
    assert_eq!(coordinator.status().completed_cycles, 1);
}

#[tokio::test]
async fn refresh_publishes_window_and_status() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let clock = support::clock();
    let coordinator = support::coordinator(fetcher.clone(), clock.clone(), 3);
    assert!(coordinator.latest_snapshot().is_none());

    let snapshot = coordinator.refresh().await.unwrap();

    assert_eq!(fetcher.requests(), vec!["15-03-2024", "16-03-2024", "17-03-2024"]);
    assert_eq!(snapshot.day_count(), 3);
    assert_eq!(snapshot.total_masses(), 6);
    assert_eq!(snapshot.last_success, clock.now());

    let status = coordinator.status();
    assert!(status.last_update_success);
    assert_eq!(status.last_success, Some(clock.now()));
    assert_eq!(status.last_error, None);
    assert_eq!(coordinator.phase(), RefreshPhase::Idle);
}

#[tokio::test]
async fn cached_days_are_not_fetched_again() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let clock = support::clock();
    let coordinator = support::coordinator(fetcher.clone(), clock.clone(), 3);

    coordinator.refresh().await.unwrap();
    let second = coordinator.refresh().await.unwrap();
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(second.cycle, 2);

    clock.advance(chrono::Duration::days(1));
    let third = coordinator.refresh().await.unwrap();

    assert_eq!(fetcher.calls(), 4);
    assert_eq!(fetcher.requests().last().map(String::as_str), Some("18-03-2024"));
    // Yesterday stays within the one-day retention window.
    assert_eq!(third.buckets.keys().next(), Some(&day("15-03-2024")));
}

#[tokio::test]
async fn buckets_older_than_retention_are_evicted() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let clock = support::clock();
    let coordinator = support::coordinator(fetcher.clone(), clock.clone(), 2).with_retention_days(1);

    coordinator.refresh().await.unwrap();
    clock.advance(chrono::Duration::days(3));
    let snapshot = coordinator.refresh().await.unwrap();

    let days: Vec<String> = snapshot.buckets.keys().map(ToString::to_string).collect();
    assert_eq!(days, vec!["18-03-2024", "19-03-2024"]);
}

#[tokio::test]
async fn unbounded_retention_keeps_every_bucket() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let clock = support::clock();
    let coordinator = support::coordinator(fetcher.clone(), clock.clone(), 2).with_retention_days(u32::MAX);

    coordinator.refresh().await.unwrap();
    clock.advance(chrono::Duration::days(3));
    let snapshot = coordinator.refresh().await.unwrap();

    assert_eq!(snapshot.day_count(), 4);
    assert!(snapshot.buckets.contains_key(&day("15-03-2024")));
}

#[tokio::test(start_paused = true)]
async fn timeout_mid_batch_leaves_previous_snapshot_intact() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let clock = support::clock();
    let coordinator = support::coordinator(fetcher.clone(), clock.clone(), 3);
    let before = coordinator.refresh().await.unwrap();

    clock.advance(chrono::Duration::days(2));
    // Two new days are missing; stall on the second of them.
    fetcher.fail_on(5, Failure::Stall);
    let err = coordinator.refresh().await.unwrap_err();

    assert!(matches!(err, MessesError::UpdateFailed { .. }));
    assert!(matches!(err.root_cause(), MessesError::Fetch(msg) if msg.contains("timed out")));
    assert!(Arc::ptr_eq(&before, &coordinator.latest_snapshot().unwrap()));

    let status = coordinator.status();
    assert!(!status.last_update_success);
    assert_eq!(status.last_success, Some(before.last_success));
    assert!(status.last_error.unwrap().starts_with("Error fetching mass data"));

    // The day that succeeded before the stall was discarded with the cycle.
    let recovered = coordinator.refresh().await.unwrap();
    assert_eq!(fetcher.requests()[5..], ["18-03-2024", "19-03-2024"]);
    assert_eq!(recovered.day_count(), 4);
}

#[tokio::test]
async fn first_refresh_failure_has_no_snapshot() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    fetcher.fail_on(1, Failure::Error(MessesError::InvalidResponse("status [false]".into())));
    let coordinator = support::coordinator(fetcher.clone(), support::clock(), 3);

    let err = coordinator.refresh().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error fetching mass data: Invalid response: status [false]"
    );
    assert!(coordinator.latest_snapshot().is_none());
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn evicted_day_is_fetched_on_next_cycle() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let coordinator = support::coordinator(fetcher.clone(), support::clock(), 3);
    coordinator.refresh().await.unwrap();

    assert!(coordinator.evict_day(day("16-03-2024")).await);
    assert_eq!(coordinator.latest_snapshot().unwrap().day_count(), 2);
    assert!(!coordinator.evict_day(day("01-01-2024")).await);

    coordinator.refresh().await.unwrap();
    assert_eq!(fetcher.calls(), 4);
    assert_eq!(fetcher.requests().last().map(String::as_str), Some("16-03-2024"));
}
