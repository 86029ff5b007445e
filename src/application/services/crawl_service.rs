//! Candidate generation with inline metric synthesis.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::domain::entities::{CandidateStatus, DomainCandidate};
use crate::domain::pricing;
use crate::domain::providers::{
    AvailabilityChecker, HistoryChecker, MetricSample, MetricsProvider, PriceQuote,
};
use crate::error::AppError;
use crate::utils::domain_name::has_digit_run;
use crate::utils::id_generator::generate_id;

/// Suffixes that make a generated name read like a real site.
const NAME_SUFFIXES: &[&str] = &[
    "news", "blog", "daily", "today", "world", "guide", "tips", "hub", "central", "pro", "expert",
    "reviews", "market", "trends", "report", "insider", "base", "zone", "place", "spot", "link",
    "connect",
];

const NAME_PREFIXES: &[&str] = &[
    "the", "my", "get", "top", "best", "pro", "all", "we", "i", "your",
];

/// Attempt budget per chunk, as a multiple of the requested batch size.
/// Guarantees chunk termination even when both gates always fail.
const RETRY_FACTOR: usize = 10;

/// Result of one generation chunk.
#[derive(Debug)]
pub struct CrawlBatch {
    /// Accepted candidates in insertion order, fewer than requested when the
    /// attempt budget ran out.
    pub candidates: Vec<DomainCandidate>,
    pub attempts: usize,
}

/// Generates domain candidates: synthesizes a plausible name, runs it
/// through the archive-history and availability gates, and attaches
/// metrics and a marketplace quote to every survivor.
///
/// Gate failures are expected rejections and retry silently; only provider
/// failures surface as errors.
pub struct CrawlService<H: HistoryChecker, A: AvailabilityChecker, M: MetricsProvider> {
    history: Arc<H>,
    availability: Arc<A>,
    metrics: Arc<M>,
    /// Probability of substituting a suggested fragment for the seed root.
    suggestion_rate: f64,
}

impl<H: HistoryChecker, A: AvailabilityChecker, M: MetricsProvider> CrawlService<H, A, M> {
    pub fn new(history: Arc<H>, availability: Arc<A>, metrics: Arc<M>, suggestion_rate: f64) -> Self {
        Self {
            history,
            availability,
            metrics,
            suggestion_rate,
        }
    }

    /// Collects up to `requested` candidates in one chunk.
    ///
    /// `seed_root` must already be sanitized (lowercase alphanumerics) and
    /// non-empty; `suggestions` likewise. Attempts are capped at
    /// `requested * 10`, so a chunk always terminates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only when a provider call fails.
    pub async fn collect_batch(
        &self,
        seed_root: &str,
        suggestions: &[String],
        requested: usize,
    ) -> Result<CrawlBatch, AppError> {
        let tlds = pricing::supported_tlds();
        let budget = requested.saturating_mul(RETRY_FACTOR);

        let mut candidates = Vec::new();
        let mut attempts = 0;

        while candidates.len() < requested && attempts < budget {
            attempts += 1;

            let name = synthesize_label(seed_root, suggestions, self.suggestion_rate);
            if name.is_empty() || has_digit_run(&name) {
                continue;
            }

            let tld = tlds[rand::rng().random_range(0..tlds.len())];

            if !self.history.has_archive_history(&name, tld).await? {
                continue;
            }
            if !self.availability.is_available(&name, tld).await? {
                continue;
            }

            let sample = self.metrics.sample_metrics(&name, tld).await?;
            let quote = self.metrics.quote_listing(tld).await?;

            candidates.push(build_candidate(name, tld, sample, quote));
        }

        tracing::debug!(
            accepted = candidates.len(),
            attempts,
            requested,
            "crawl chunk finished"
        );

        Ok(CrawlBatch {
            candidates,
            attempts,
        })
    }
}

/// Derives one candidate label: seed root or a suggested fragment, passed
/// through a weighted shape transform.
fn synthesize_label(seed_root: &str, suggestions: &[String], suggestion_rate: f64) -> String {
    let mut root = seed_root;
    if !suggestions.is_empty() && rand::rng().random_bool(suggestion_rate) {
        root = &suggestions[rand::rng().random_range(0..suggestions.len())];
    }

    // Shape weights: suffix 0.3, prefix 0.3, hyphenated 0.2, bare 0.2.
    let roll: f64 = rand::rng().random();
    if roll < 0.3 {
        format!("{root}{}", pick(NAME_SUFFIXES))
    } else if roll < 0.6 {
        format!("{}{root}", pick(NAME_PREFIXES))
    } else if roll < 0.8 {
        format!("{root}-{}", pick(NAME_SUFFIXES))
    } else {
        root.to_string()
    }
}

fn pick<'a>(items: &[&'a str]) -> &'a str {
    items[rand::rng().random_range(0..items.len())]
}

fn build_candidate(name: String, tld: &str, sample: MetricSample, quote: PriceQuote) -> DomainCandidate {
    let now = Utc::now();

    DomainCandidate {
        id: generate_id(),
        name,
        tld: tld.to_string(),
        metrics: sample.metrics,
        anchor_status: sample.anchor_status,
        indexed: sample.indexed,
        wayback_clean: sample.wayback_clean,
        archive_snapshot_count: sample.archive_snapshot_count,
        archive_first_seen_year: now.year() - sample.age as i32,
        price: round_price(quote.price),
        marketplace: quote.marketplace,
        is_auction: quote.is_auction,
        auction_ends_at: quote.auction_ends_at,
        bid_count: quote.bid_count,
        age: sample.age,
        // The availability gate only passes dropped registrations.
        is_expired: true,
        status: CandidateStatus::Pending,
        check_progress: 0,
        created_at: now,
    }
}

fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AnchorStatus, AuthorityMetrics, Marketplace};
    use crate::domain::providers::{
        MockAvailabilityChecker, MockHistoryChecker, MockMetricsProvider,
    };

    fn sample() -> MetricSample {
        MetricSample {
            metrics: AuthorityMetrics {
                domain_rating: 30,
                url_rating: 25,
                referring_domains: 120,
                trust_flow: 15,
                citation_flow: 22,
                traffic: 800,
            },
            anchor_status: AnchorStatus::Clean,
            indexed: true,
            wayback_clean: true,
            archive_snapshot_count: 44,
            age: 7,
        }
    }

    fn quote() -> PriceQuote {
        PriceQuote {
            price: 10.28,
            marketplace: Marketplace::Registry,
            is_auction: false,
            auction_ends_at: None,
            bid_count: None,
        }
    }

    fn service_with(
        history_passes: bool,
        availability_passes: bool,
    ) -> CrawlService<MockHistoryChecker, MockAvailabilityChecker, MockMetricsProvider> {
        let mut history = MockHistoryChecker::new();
        history
            .expect_has_archive_history()
            .returning(move |_, _| Ok(history_passes));

        let mut availability = MockAvailabilityChecker::new();
        availability
            .expect_is_available()
            .returning(move |_, _| Ok(availability_passes));

        let mut metrics = MockMetricsProvider::new();
        metrics
            .expect_sample_metrics()
            .returning(|_, _| Ok(sample()));
        metrics.expect_quote_listing().returning(|_| Ok(quote()));

        CrawlService::new(
            Arc::new(history),
            Arc::new(availability),
            Arc::new(metrics),
            0.3,
        )
    }

    #[tokio::test]
    async fn test_chunk_terminates_when_gates_never_pass() {
        let service = service_with(false, false);

        let batch = service.collect_batch("crypto", &[], 20).await.unwrap();

        assert!(batch.candidates.is_empty());
        assert_eq!(batch.attempts, 200);
    }

    #[tokio::test]
    async fn test_availability_not_checked_without_history() {
        let mut history = MockHistoryChecker::new();
        history
            .expect_has_archive_history()
            .returning(|_, _| Ok(false));

        let mut availability = MockAvailabilityChecker::new();
        availability.expect_is_available().times(0);

        let metrics = MockMetricsProvider::new();

        let service = CrawlService::new(
            Arc::new(history),
            Arc::new(availability),
            Arc::new(metrics),
            0.3,
        );

        let batch = service.collect_batch("crypto", &[], 5).await.unwrap();
        assert!(batch.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_collects_requested_count_when_gates_pass() {
        let service = service_with(true, true);

        let batch = service.collect_batch("crypto", &[], 25).await.unwrap();

        assert_eq!(batch.candidates.len(), 25);
        for candidate in &batch.candidates {
            assert_eq!(candidate.status, CandidateStatus::Pending);
            assert!(candidate.is_expired);
            assert!(pricing::is_supported_tld(&candidate.tld));
            assert!(candidate.name.contains("crypto"));
        }
    }

    #[tokio::test]
    async fn test_digit_run_seed_yields_nothing() {
        // Every shaped label keeps the 5-digit run, so every attempt is
        // rejected before the gates.
        let service = service_with(true, true);

        let batch = service.collect_batch("promo20245", &[], 10).await.unwrap();

        assert!(batch.candidates.is_empty());
        assert_eq!(batch.attempts, 100);
    }

    #[tokio::test]
    async fn test_suggestion_substitution_at_full_rate() {
        let mut history = MockHistoryChecker::new();
        history
            .expect_has_archive_history()
            .returning(|_, _| Ok(true));
        let mut availability = MockAvailabilityChecker::new();
        availability.expect_is_available().returning(|_, _| Ok(true));
        let mut metrics = MockMetricsProvider::new();
        metrics
            .expect_sample_metrics()
            .returning(|_, _| Ok(sample()));
        metrics.expect_quote_listing().returning(|_| Ok(quote()));

        let service = CrawlService::new(
            Arc::new(history),
            Arc::new(availability),
            Arc::new(metrics),
            1.0,
        );

        let suggestions = vec!["zephyr".to_string()];
        let batch = service
            .collect_batch("crypto", &suggestions, 10)
            .await
            .unwrap();

        assert_eq!(batch.candidates.len(), 10);
        for candidate in &batch.candidates {
            assert!(
                candidate.name.contains("zephyr"),
                "expected suggestion root in {}",
                candidate.name
            );
        }
    }

    #[test]
    fn test_round_price_two_decimals() {
        assert_eq!(round_price(10.279_999), 10.28);
        assert_eq!(round_price(15.0), 15.0);
        assert_eq!(round_price(3.005), 3.01);
    }

    #[test]
    fn test_synthesize_label_shapes() {
        for _ in 0..200 {
            let label = synthesize_label("crypto", &[], 0.0);
            assert!(label.contains("crypto"));
            assert!(!label.is_empty());
        }
    }
}
