//! Simulated authority metrics and marketplace quotes.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::domain::entities::{AnchorStatus, AuthorityMetrics, Marketplace};
use crate::domain::pricing::registration_fee;
use crate::domain::providers::{MetricSample, MetricsProvider, PriceQuote};
use crate::error::AppError;

// Draw ceilings for the authority scores.
const MAX_DOMAIN_RATING: u8 = 60;
const MAX_URL_RATING: u8 = 55;
const MAX_REFERRING_DOMAINS: u16 = 200;
const MAX_TRUST_FLOW: u8 = 40;
const MAX_CITATION_FLOW: u8 = 45;
const MAX_TRAFFIC: u32 = 5_000;

const MAX_SNAPSHOT_COUNT: u32 = 400;
const MAX_AGE_YEARS: u32 = 22;

// Auction premium on top of the registration fee.
const MIN_PREMIUM: u32 = 5;
const MAX_PREMIUM: u32 = 20;

const MAX_BID_COUNT: u32 = 40;
const MAX_AUCTION_HOURS: i64 = 72;

/// Bounded-random stand-in for backlink APIs and marketplace feeds.
///
/// Every score is drawn independently; the price never drops below the
/// TLD's registration fee, and an auction adds a premium on top of it.
/// Swap this for real integrations without touching pipeline logic.
pub struct SimulatedMetricsProvider {
    indexed_rate: f64,
    wayback_clean_rate: f64,
    auction_rate: f64,
}

impl SimulatedMetricsProvider {
    /// All rates must already be validated to `[0, 1]` by the config.
    pub fn new(indexed_rate: f64, wayback_clean_rate: f64, auction_rate: f64) -> Self {
        Self {
            indexed_rate,
            wayback_clean_rate,
            auction_rate,
        }
    }

    fn draw_anchor_status() -> AnchorStatus {
        let roll: f64 = rand::rng().random();
        if roll > 0.7 {
            AnchorStatus::Spam
        } else if roll > 0.5 {
            AnchorStatus::Mixed
        } else {
            AnchorStatus::Clean
        }
    }

    fn draw_marketplace() -> Marketplace {
        let roll: f64 = rand::rng().random();
        if roll < 0.8 {
            Marketplace::Registry
        } else if roll < 0.9 {
            Marketplace::Closeouts
        } else {
            Marketplace::Auctions
        }
    }
}

#[async_trait]
impl MetricsProvider for SimulatedMetricsProvider {
    async fn sample_metrics(&self, _name: &str, _tld: &str) -> Result<MetricSample, AppError> {
        let mut rng = rand::rng();

        let metrics = AuthorityMetrics {
            domain_rating: rng.random_range(0..=MAX_DOMAIN_RATING),
            url_rating: rng.random_range(0..=MAX_URL_RATING),
            referring_domains: rng.random_range(0..=MAX_REFERRING_DOMAINS),
            trust_flow: rng.random_range(0..=MAX_TRUST_FLOW),
            citation_flow: rng.random_range(0..=MAX_CITATION_FLOW),
            traffic: rng.random_range(0..=MAX_TRAFFIC),
        };

        let indexed = rng.random_bool(self.indexed_rate);
        let wayback_clean = rng.random_bool(self.wayback_clean_rate);
        let archive_snapshot_count = rng.random_range(1..=MAX_SNAPSHOT_COUNT);
        let age = rng.random_range(1..=MAX_AGE_YEARS);

        Ok(MetricSample {
            metrics,
            anchor_status: Self::draw_anchor_status(),
            indexed,
            wayback_clean,
            archive_snapshot_count,
            age,
        })
    }

    async fn quote_listing(&self, tld: &str) -> Result<PriceQuote, AppError> {
        let fee = registration_fee(tld);
        let marketplace = Self::draw_marketplace();

        let mut rng = rand::rng();
        let is_auction = marketplace.is_auction_capable() && rng.random_bool(self.auction_rate);

        if !is_auction {
            return Ok(PriceQuote {
                price: fee,
                marketplace,
                is_auction: false,
                auction_ends_at: None,
                bid_count: None,
            });
        }

        let premium = rng.random_range(MIN_PREMIUM..=MAX_PREMIUM) as f64;
        let hours = rng.random_range(1..=MAX_AUCTION_HOURS);
        let bid_count = rng.random_range(1..=MAX_BID_COUNT);

        Ok(PriceQuote {
            price: fee + premium,
            marketplace,
            is_auction: true,
            auction_ends_at: Some(Utc::now() + Duration::hours(hours)),
            bid_count: Some(bid_count),
        })
    }
}
