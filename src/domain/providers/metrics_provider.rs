//! Provider trait for authority metrics and marketplace listings.

use chrono::{DateTime, Utc};

use crate::domain::entities::{AnchorStatus, AuthorityMetrics, Marketplace};
use crate::error::AppError;
use async_trait::async_trait;

/// One bundle of third-party measurements for an accepted candidate.
#[derive(Debug, Clone)]
pub struct MetricSample {
    pub metrics: AuthorityMetrics,
    pub anchor_status: AnchorStatus,
    pub indexed: bool,
    pub wayback_clean: bool,
    pub archive_snapshot_count: u32,
    /// Years since the first archive sighting.
    pub age: u32,
}

/// Commercial terms of a listing.
///
/// Invariant: `price` never drops below the TLD's registration fee; an
/// auction listing carries a premium on top of it, never a discount.
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub price: f64,
    pub marketplace: Marketplace,
    pub is_auction: bool,
    pub auction_ends_at: Option<DateTime<Utc>>,
    pub bid_count: Option<u32>,
}

/// Supplies authority metrics and the marketplace quote for a candidate.
///
/// The bundled implementation draws everything from bounded random ranges;
/// a real one would aggregate backlink APIs and marketplace feeds.
///
/// # Implementations
///
/// - [`crate::infrastructure::simulation::SimulatedMetricsProvider`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Measures authority, trust, and archive signals for `name + tld`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the underlying source fails.
    async fn sample_metrics(&self, name: &str, tld: &str) -> Result<MetricSample, AppError>;

    /// Quotes where the domain is listed and at what price.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the underlying source fails.
    async fn quote_listing(&self, tld: &str) -> Result<PriceQuote, AppError>;
}
