//! Provider trait for the external audit-report collaborator.

use crate::domain::entities::{DomainCandidate, FilterProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Text-generation collaborator that writes a natural-language audit of a
/// clean batch against the active profile.
///
/// Purely advisory: the returned text never affects pipeline state, and a
/// failure is replaced by a placeholder message.
///
/// # Implementations
///
/// - [`crate::infrastructure::audit::TemplateAuditReporter`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditReporter: Send + Sync {
    /// Produces free-text commentary for the given candidates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the service is unreachable;
    /// callers substitute a placeholder report.
    async fn audit(
        &self,
        candidates: &[DomainCandidate],
        profile: &FilterProfile,
    ) -> Result<String, AppError>;
}
