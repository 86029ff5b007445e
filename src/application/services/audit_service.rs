//! Advisory audit-report orchestration.

use std::sync::Arc;

use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::domain::entities::{DomainCandidate, FilterProfile};
use crate::domain::providers::AuditReporter;

/// At most this many candidates are handed to the collaborator per report.
pub const MAX_AUDIT_BATCH: usize = 20;

/// Shown instead of a report when the collaborator stays unreachable.
pub const FALLBACK_REPORT: &str = "The audit service is currently unavailable. \
The inventory above passed the local qualification and penalty checks; \
request the narrative report again later.";

/// Requests free-text commentary on a clean batch, degrading to a
/// placeholder when the collaborator fails. Never returns an error and
/// never touches pipeline state.
pub struct AuditService<R: AuditReporter> {
    reporter: Arc<R>,
}

impl<R: AuditReporter> AuditService<R> {
    pub fn new(reporter: Arc<R>) -> Self {
        Self { reporter }
    }

    /// Produces the audit text for up to [`MAX_AUDIT_BATCH`] candidates.
    ///
    /// Retries the collaborator twice on failure before falling back.
    pub async fn report(&self, candidates: &[DomainCandidate], profile: &FilterProfile) -> String {
        let batch = &candidates[..candidates.len().min(MAX_AUDIT_BATCH)];

        let strategy = FixedInterval::from_millis(200).take(2);
        match Retry::spawn(strategy, || self.reporter.audit(batch, profile)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "audit collaborator unavailable, using placeholder");
                FALLBACK_REPORT.to_string()
            }
        }
    }
}
