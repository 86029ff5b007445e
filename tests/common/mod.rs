#![allow(dead_code)]

use chrono::Utc;
use domain_hunter::prelude::*;

/// A well-formed candidate that would pass the default profile and the
/// penalty gate; tweak fields per test via struct update syntax.
pub fn candidate(id: &str) -> DomainCandidate {
    DomainCandidate {
        id: id.to_string(),
        name: format!("site{id}"),
        tld: ".com".to_string(),
        metrics: AuthorityMetrics {
            domain_rating: 20,
            url_rating: 20,
            referring_domains: 50,
            trust_flow: 10,
            citation_flow: 10,
            traffic: 250,
        },
        anchor_status: AnchorStatus::Clean,
        indexed: true,
        wayback_clean: true,
        archive_snapshot_count: 15,
        archive_first_seen_year: 2017,
        price: 10.28,
        marketplace: Marketplace::Registry,
        is_auction: false,
        auction_ends_at: None,
        bid_count: None,
        age: 8,
        is_expired: true,
        status: CandidateStatus::Pending,
        check_progress: 0,
        created_at: Utc::now(),
    }
}

pub fn with_dr_and_price(id: &str, dr: u8, price: f64) -> DomainCandidate {
    let mut c = candidate(id);
    c.metrics.domain_rating = dr;
    c.price = price;
    c
}

pub fn with_trust(id: &str, indexed: bool, wayback_clean: bool) -> DomainCandidate {
    let mut c = candidate(id);
    c.indexed = indexed;
    c.wayback_clean = wayback_clean;
    c
}

pub fn inventory_of(candidates: Vec<DomainCandidate>) -> Inventory {
    let mut inventory = Inventory::new();
    inventory.append_batch(candidates);
    inventory
}
