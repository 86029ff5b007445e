mod common;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use domain_hunter::application::services::{CrawlService, PipelineService, RunOptions};
use domain_hunter::config::{Config, SimulationConfig};
use domain_hunter::infrastructure::simulation::{
    SimulatedAvailabilityChecker, SimulatedHistoryChecker, SimulatedMetricsProvider,
};
use domain_hunter::infrastructure::suggestions::CannedSuggestionClient;
use domain_hunter::prelude::*;
use domain_hunter::state::AppState;
use tokio::sync::mpsc;

fn fast_config(tick_ms: u64) -> Config {
    Config {
        tick_interval_ms: tick_ms,
        snapshot_path: PathBuf::from("unused_snapshot.json"),
        simulation: SimulationConfig {
            archive_hit_rate: 1.0,
            availability_rate: 1.0,
            ..SimulationConfig::default()
        },
        ..Config::default()
    }
}

fn options(seed: &str, target: usize, append: bool) -> RunOptions {
    RunOptions {
        seed_keyword: seed.to_string(),
        target,
        append,
        profile: FilterProfile::default(),
    }
}

fn event_tag(event: &PipelineEvent) -> &'static str {
    match event {
        PipelineEvent::CrawlStarted { .. } => "crawl_started",
        PipelineEvent::SuggestionsLoaded { .. } => "suggestions_loaded",
        PipelineEvent::SuggestionsUnavailable { .. } => "suggestions_unavailable",
        PipelineEvent::CrawlProgress { .. } => "crawl_progress",
        PipelineEvent::CrawlCompleted { .. } => "crawl_completed",
        PipelineEvent::FilterStarted { .. } => "filter_started",
        PipelineEvent::FilterCompleted { .. } => "filter_completed",
        PipelineEvent::VerificationStarted { .. } => "verification_started",
        PipelineEvent::VerificationProgress { .. } => "verification_progress",
        PipelineEvent::VerificationCompleted { .. } => "verification_completed",
        PipelineEvent::RunCompleted { .. } => "run_completed",
        PipelineEvent::RunCancelled { .. } => "run_cancelled",
    }
}

fn drain(events: &mut mpsc::Receiver<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut collected = Vec::new();
    while let Ok(event) = events.try_recv() {
        collected.push(event);
    }
    collected
}

#[tokio::test]
async fn test_full_run_completes_with_ordered_phases() {
    let (state, mut events) = AppState::new(fast_config(1));

    let run = state.pipeline.start(options("crypto", 300, false)).unwrap();
    let summary = run.handle.await.unwrap().unwrap();

    assert!(!summary.cancelled);
    assert_eq!(summary.stats.total_found, 300);
    assert_eq!(
        summary.stats.passed_filters + summary.stats.rejected,
        summary.stats.total_found
    );
    assert_eq!(
        summary.stats.clean_domains + summary.stats.penalized,
        summary.stats.passed_filters
    );

    let tags: Vec<_> = drain(&mut events).iter().map(event_tag).collect();
    let position = |tag: &str| tags.iter().position(|t| *t == tag);

    let crawl_started = position("crawl_started").expect("crawl started");
    let crawl_completed = position("crawl_completed").expect("crawl completed");
    let filter_started = position("filter_started").expect("filter started");
    let filter_completed = position("filter_completed").expect("filter completed");
    let verify_started = position("verification_started").expect("verify started");
    let verify_completed = position("verification_completed").expect("verify completed");
    let run_completed = position("run_completed").expect("run completed");

    assert!(crawl_started < crawl_completed);
    assert!(crawl_completed < filter_started, "filter began before crawl finished");
    assert!(filter_started < filter_completed);
    assert!(filter_completed < verify_started, "verify began before filter finished");
    assert!(verify_started < verify_completed);
    assert!(verify_completed < run_completed);
    assert!(!tags.contains(&"run_cancelled"));

    // No entity was left mid-pipeline.
    let inventory = state.inventory.read().unwrap();
    assert_eq!(inventory.count_with_status(CandidateStatus::Pending), 0);
    assert_eq!(inventory.count_with_status(CandidateStatus::Analyzing), 0);
}

#[tokio::test]
async fn test_scenario_d_cancel_mid_crawl_keeps_collection_stable() {
    let (state, mut events) = AppState::new(fast_config(25));

    let run = state.pipeline.start(options("crypto", 50_000, false)).unwrap();

    // Wait until the crawl demonstrably made progress, then cancel.
    loop {
        match events.recv().await.expect("events closed early") {
            PipelineEvent::CrawlProgress { .. } => break,
            _ => continue,
        }
    }
    run.controller.cancel();

    let summary = run.handle.await.unwrap().unwrap();
    assert!(summary.cancelled);
    assert!(summary.stats.total_found < 50_000);

    // Nothing may be scheduled after cancellation: the inventory matches the
    // summary exactly, now and shortly after.
    let len_at_cancel = state.inventory.read().unwrap().len();
    assert_eq!(len_at_cancel, summary.stats.total_found);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(state.inventory.read().unwrap().len(), len_at_cancel);

    // The filter phase never ran.
    let inventory = state.inventory.read().unwrap();
    assert_eq!(
        inventory.count_with_status(CandidateStatus::Pending),
        inventory.len()
    );
    drop(inventory);

    let collected = drain(&mut events);
    assert!(
        collected
            .iter()
            .any(|e| matches!(e, PipelineEvent::RunCancelled { phase: PipelinePhase::Crawl, .. })),
        "expected a crawl-phase cancellation event"
    );
    assert!(!collected.iter().any(|e| matches!(e, PipelineEvent::FilterStarted { .. })));
}

#[tokio::test]
async fn test_second_start_conflicts_while_active() {
    let (state, _events) = AppState::new(fast_config(25));

    let run = state.pipeline.start(options("crypto", 50_000, false)).unwrap();

    let err = state
        .pipeline
        .start(options("crypto", 10, false))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    run.controller.cancel();
    run.handle.await.unwrap().unwrap();

    // The guard is released once the run ends.
    let rerun = state.pipeline.start(options("crypto", 100, false)).unwrap();
    let summary = rerun.handle.await.unwrap().unwrap();
    assert!(!summary.cancelled);
}

#[tokio::test]
async fn test_append_keeps_previous_inventory_and_fresh_run_clears_it() {
    let (state, _events) = AppState::new(fast_config(1));

    let first = state.pipeline.start(options("crypto", 100, false)).unwrap();
    first.handle.await.unwrap().unwrap();
    assert_eq!(state.inventory.read().unwrap().len(), 100);

    let appended = state.pipeline.start(options("crypto", 50, true)).unwrap();
    appended.handle.await.unwrap().unwrap();
    assert_eq!(state.inventory.read().unwrap().len(), 150);

    let fresh = state.pipeline.start(options("health", 40, false)).unwrap();
    fresh.handle.await.unwrap().unwrap();
    assert_eq!(state.inventory.read().unwrap().len(), 40);
}

#[tokio::test]
async fn test_suggestion_outage_degrades_to_keyword_naming() {
    let inventory = Arc::new(RwLock::new(Inventory::new()));
    let (event_tx, mut events) = mpsc::channel(1024);

    let crawl = CrawlService::new(
        Arc::new(SimulatedHistoryChecker::new(1.0)),
        Arc::new(SimulatedAvailabilityChecker::new(1.0)),
        Arc::new(SimulatedMetricsProvider::new(0.7, 0.8, 0.5)),
        0.3,
    );
    let pipeline = PipelineService::new(
        crawl,
        Arc::new(CannedSuggestionClient::unavailable()),
        Arc::clone(&inventory),
        event_tx,
        Duration::from_millis(1),
    );

    let run = pipeline.start(options("crypto", 120, false)).unwrap();
    let summary = run.handle.await.unwrap().unwrap();

    assert!(!summary.cancelled);
    assert_eq!(summary.stats.total_found, 120);

    let tags: Vec<_> = drain(&mut events).iter().map(event_tag).collect();
    assert!(tags.contains(&"suggestions_unavailable"));
    assert!(tags.contains(&"run_completed"));
}

#[tokio::test]
async fn test_unusable_options_are_rejected_up_front() {
    let (state, _events) = AppState::new(fast_config(1));

    let err = state
        .pipeline
        .start(options("!!!", 100, false))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = state.pipeline.start(options("crypto", 0, false)).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let mut bad_profile = options("crypto", 100, false);
    bad_profile.profile.max_price = 0.0;
    let err = state.pipeline.start(bad_profile).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    // Failed starts never engage the active-run guard.
    assert!(!state.pipeline.is_active());
}
