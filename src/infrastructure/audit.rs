//! Template-based audit-report collaborator.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::entities::{DomainCandidate, FilterProfile};
use crate::domain::providers::AuditReporter;
use crate::error::AppError;

/// Deterministic stand-in for the external text-generation service.
///
/// Summarizes the batch in plain text: metric ranges, price spread, and the
/// TLD mix, with the active thresholds for context.
pub struct TemplateAuditReporter;

impl TemplateAuditReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplateAuditReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditReporter for TemplateAuditReporter {
    async fn audit(
        &self,
        candidates: &[DomainCandidate],
        profile: &FilterProfile,
    ) -> Result<String, AppError> {
        if candidates.is_empty() {
            return Ok("No clean domains to audit yet. Run the pipeline first.".to_string());
        }

        let count = candidates.len();
        let dr_min = candidates.iter().map(|c| c.metrics.domain_rating).min().unwrap_or(0);
        let dr_max = candidates.iter().map(|c| c.metrics.domain_rating).max().unwrap_or(0);
        let dr_avg = candidates
            .iter()
            .map(|c| c.metrics.domain_rating as usize)
            .sum::<usize>()
            / count;

        let price_min = candidates.iter().map(|c| c.price).fold(f64::MAX, f64::min);
        let price_max = candidates.iter().map(|c| c.price).fold(0.0f64, f64::max);

        let mut tld_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for candidate in candidates {
            *tld_counts.entry(candidate.tld.as_str()).or_default() += 1;
        }
        let mut tlds: Vec<_> = tld_counts.into_iter().collect();
        tlds.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let tld_summary = tlds
            .iter()
            .take(3)
            .map(|(tld, n)| format!("{tld} ({n})"))
            .collect::<Vec<_>>()
            .join(", ");

        let auctions = candidates.iter().filter(|c| c.is_auction).count();
        let aged = candidates.iter().filter(|c| c.age >= 10).count();

        let mut report = format!(
            "Audited {count} clean domains against the active profile \
(min DR {min_dr}, max price {max_price:.2}).\n",
            min_dr = profile.min_domain_rating,
            max_price = profile.max_price,
        );
        report.push_str(&format!(
            "Domain Rating spans {dr_min}-{dr_max} (average {dr_avg}); \
prices span {price_min:.2}-{price_max:.2}.\n"
        ));
        report.push_str(&format!("Most common extensions: {tld_summary}.\n"));
        if auctions > 0 {
            report.push_str(&format!(
                "{auctions} listings carry an auction premium; compare against the registration fee before bidding.\n"
            ));
        }
        if aged > 0 {
            report.push_str(&format!(
                "{aged} domains have ten or more years of archive history, the strongest candidates for immediate reuse.\n"
            ));
        }
        report.push_str(
            "All listed domains passed the index and archive-cleanliness checks; \
re-verify manually before purchase.",
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        AnchorStatus, AuthorityMetrics, CandidateStatus, Marketplace,
    };
    use chrono::Utc;

    fn clean(id: &str, dr: u8, price: f64, tld: &str) -> DomainCandidate {
        DomainCandidate {
            id: id.to_string(),
            name: format!("site{id}"),
            tld: tld.to_string(),
            metrics: AuthorityMetrics {
                domain_rating: dr,
                url_rating: 20,
                referring_domains: 60,
                trust_flow: 15,
                citation_flow: 18,
                traffic: 300,
            },
            anchor_status: AnchorStatus::Clean,
            indexed: true,
            wayback_clean: true,
            archive_snapshot_count: 12,
            archive_first_seen_year: 2016,
            price,
            marketplace: Marketplace::Registry,
            is_auction: false,
            auction_ends_at: None,
            bid_count: None,
            age: 9,
            is_expired: true,
            status: CandidateStatus::Clean,
            check_progress: 100,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_has_friendly_message() {
        let report = TemplateAuditReporter::new()
            .audit(&[], &FilterProfile::default())
            .await
            .unwrap();
        assert!(report.contains("No clean domains"));
    }

    #[tokio::test]
    async fn test_report_summarizes_batch() {
        let batch = vec![
            clean("a", 12, 10.28, ".com"),
            clean("b", 40, 23.98, ".co"),
            clean("c", 25, 9.68, ".com"),
        ];

        let report = TemplateAuditReporter::new()
            .audit(&batch, &FilterProfile::default())
            .await
            .unwrap();

        assert!(report.contains("Audited 3 clean domains"));
        assert!(report.contains("12-40"));
        assert!(report.contains(".com (2)"));
    }
}
