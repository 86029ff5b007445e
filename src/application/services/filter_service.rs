//! Qualification filter: threshold profile applied over the collection.

use crate::domain::entities::{AnchorStatus, CandidateStatus, DomainCandidate, FilterProfile};
use crate::domain::inventory::Inventory;
use crate::error::AppError;

/// Counts from one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub passed: usize,
    pub rejected: usize,
}

/// Applies a [`FilterProfile`] to every pending candidate, moving each to
/// `Analyzing` (qualified for penalty verification) or terminal `Rejected`.
///
/// Total over the pending population and idempotent: candidates already
/// past `Pending` are never touched, so re-running is a no-op.
#[derive(Debug, Default)]
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// One complete filter pass.
    ///
    /// # Errors
    ///
    /// Propagates inventory transition failures; with a well-formed
    /// inventory these cannot occur.
    pub fn apply(
        &self,
        inventory: &mut Inventory,
        profile: &FilterProfile,
    ) -> Result<FilterOutcome, AppError> {
        let pending = inventory.ids_with_status(CandidateStatus::Pending);
        let mut outcome = FilterOutcome::default();

        for id in pending {
            let qualifies = inventory
                .get(&id)
                .map(|candidate| Self::qualifies(candidate, profile))
                .unwrap_or(false);

            if qualifies {
                inventory.transition(&id, CandidateStatus::Analyzing)?;
                outcome.passed += 1;
            } else {
                inventory.transition(&id, CandidateStatus::Rejected)?;
                outcome.rejected += 1;
            }
        }

        tracing::info!(
            passed = outcome.passed,
            rejected = outcome.rejected,
            "qualification filter applied"
        );

        Ok(outcome)
    }

    /// The decision rule: all conditions must hold.
    pub fn qualifies(candidate: &DomainCandidate, profile: &FilterProfile) -> bool {
        let m = &candidate.metrics;

        let passed_metrics = m.domain_rating >= profile.min_domain_rating
            && m.url_rating >= profile.min_url_rating
            && m.referring_domains >= profile.min_referring_domains
            && m.trust_flow >= profile.min_trust_flow
            && m.citation_flow >= profile.min_citation_flow;

        let passed_price = candidate.price <= profile.max_price;
        let passed_tld = profile.permits_tld(&candidate.tld);
        let clean_content =
            !profile.exclude_spam_anchors || candidate.anchor_status != AnchorStatus::Spam;

        passed_metrics && passed_price && passed_tld && clean_content
    }
}
