mod common;

use common::{inventory_of, with_trust};
use domain_hunter::application::services::{FilterService, PenaltyService};
use domain_hunter::prelude::*;

fn analyzing_inventory(candidates: Vec<DomainCandidate>) -> Inventory {
    let mut inventory = inventory_of(candidates);
    FilterService::new()
        .apply(&mut inventory, &FilterProfile::default())
        .unwrap();
    inventory
}

#[test]
fn test_scenario_c_unindexed_entity_is_penalized() {
    let mut inventory = analyzing_inventory(vec![with_trust("a", false, true)]);

    PenaltyService::new().verify_chunk(&mut inventory, 10).unwrap();

    assert_eq!(inventory.get("a").unwrap().status, CandidateStatus::Penalized);
}

#[test]
fn test_clean_iff_indexed_and_wayback_clean() {
    let mut inventory = analyzing_inventory(vec![
        with_trust("a", true, true),
        with_trust("b", true, false),
        with_trust("c", false, true),
        with_trust("d", false, false),
    ]);

    let service = PenaltyService::new();
    loop {
        let outcome = service.verify_chunk(&mut inventory, 2).unwrap();
        if outcome.remaining == 0 {
            break;
        }
    }

    for candidate in inventory.candidates() {
        let expected = if candidate.indexed && candidate.wayback_clean {
            CandidateStatus::Clean
        } else {
            CandidateStatus::Penalized
        };
        assert_eq!(candidate.status, expected, "candidate {}", candidate.id);
        assert_eq!(candidate.check_progress, 100);
    }
}

#[test]
fn test_authority_metrics_are_ignored_by_penalty_gate() {
    let mut strong = with_trust("a", false, false);
    strong.metrics.domain_rating = 95;
    strong.metrics.referring_domains = 490;

    let mut inventory = analyzing_inventory(vec![strong]);
    PenaltyService::new().verify_chunk(&mut inventory, 10).unwrap();

    assert_eq!(inventory.get("a").unwrap().status, CandidateStatus::Penalized);
}

#[test]
fn test_lifecycle_is_monotonic_through_the_stages() {
    let mut inventory = analyzing_inventory(vec![with_trust("a", true, true)]);
    PenaltyService::new().verify_chunk(&mut inventory, 10).unwrap();
    assert_eq!(inventory.get("a").unwrap().status, CandidateStatus::Clean);

    // Every backward move is refused.
    assert!(inventory.transition("a", CandidateStatus::Analyzing).is_err());
    assert!(inventory.transition("a", CandidateStatus::Pending).is_err());
    assert!(inventory.transition("a", CandidateStatus::Penalized).is_err());
    assert_eq!(inventory.get("a").unwrap().status, CandidateStatus::Clean);
}

#[test]
fn test_verifier_only_touches_analyzing_entities() {
    let mut rejected_early = with_trust("out", true, true);
    rejected_early.metrics.domain_rating = 2;

    let mut inventory = analyzing_inventory(vec![rejected_early, with_trust("ok", true, true)]);

    PenaltyService::new().verify_chunk(&mut inventory, 10).unwrap();

    assert_eq!(inventory.get("out").unwrap().status, CandidateStatus::Rejected);
    assert_eq!(inventory.get("ok").unwrap().status, CandidateStatus::Clean);
}
