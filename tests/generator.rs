mod common;

use std::sync::Arc;

use domain_hunter::application::services::CrawlService;
use domain_hunter::domain::pricing;
use domain_hunter::infrastructure::simulation::{
    SimulatedAvailabilityChecker, SimulatedHistoryChecker, SimulatedMetricsProvider,
};
use domain_hunter::prelude::*;
use domain_hunter::utils::domain_name::has_digit_run;

fn service(
    archive_rate: f64,
    availability_rate: f64,
) -> CrawlService<SimulatedHistoryChecker, SimulatedAvailabilityChecker, SimulatedMetricsProvider> {
    CrawlService::new(
        Arc::new(SimulatedHistoryChecker::new(archive_rate)),
        Arc::new(SimulatedAvailabilityChecker::new(availability_rate)),
        Arc::new(SimulatedMetricsProvider::new(0.7, 0.8, 0.5)),
        0.3,
    )
}

#[tokio::test]
async fn test_scenario_a_seed_crypto_target_50() {
    let service = service(0.4, 0.2);

    let batch = service.collect_batch("crypto", &[], 50).await.unwrap();

    assert!(batch.candidates.len() <= 50);
    for candidate in &batch.candidates {
        assert!(pricing::is_supported_tld(&candidate.tld));
        assert!(!has_digit_run(&candidate.name));
        assert_eq!(candidate.status, CandidateStatus::Pending);
        assert!(candidate.is_expired);
    }
}

#[tokio::test]
async fn test_generated_names_never_contain_digit_runs() {
    let service = service(1.0, 1.0);

    let batch = service.collect_batch("web3", &[], 300).await.unwrap();

    assert_eq!(batch.candidates.len(), 300);
    for candidate in &batch.candidates {
        assert!(
            !has_digit_run(&candidate.name),
            "digit run leaked into {}",
            candidate.name
        );
    }
}

#[tokio::test]
async fn test_price_floor_holds_across_population() {
    let service = service(1.0, 1.0);

    let batch = service.collect_batch("health", &[], 400).await.unwrap();

    for candidate in &batch.candidates {
        let floor = pricing::registration_fee(&candidate.tld);
        assert!(
            candidate.price >= floor,
            "{} priced {} under floor {}",
            candidate.full_name(),
            candidate.price,
            floor
        );
        if !candidate.is_auction {
            assert_eq!(candidate.price, floor);
            assert!(candidate.bid_count.is_none());
            assert!(candidate.auction_ends_at.is_none());
        } else {
            assert!(candidate.marketplace.is_auction_capable());
        }
    }
}

#[tokio::test]
async fn test_pathological_gates_still_terminate() {
    let service = service(0.0, 0.0);

    let batch = service.collect_batch("crypto", &[], 100).await.unwrap();

    assert!(batch.candidates.is_empty());
    assert_eq!(batch.attempts, 1_000);
}

#[tokio::test]
async fn test_metrics_are_write_once_shaped() {
    let service = service(1.0, 1.0);

    let batch = service.collect_batch("finance", &[], 50).await.unwrap();

    for candidate in &batch.candidates {
        assert!(candidate.metrics.domain_rating <= 100);
        assert!(candidate.age >= 1);
        assert!(candidate.archive_snapshot_count >= 1);
        assert_eq!(candidate.check_progress, 0);
        // Price is always stored at two-decimal precision.
        let cents = candidate.price * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6);
    }
}
