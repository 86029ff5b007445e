//! Provider trait for archive-history lookups.

use crate::error::AppError;
use async_trait::async_trait;

/// Answers whether a domain name has a usable archived history.
///
/// This is the first of the two availability gates every generated candidate
/// must pass. The bundled implementation simulates the check with a
/// Bernoulli draw; a real implementation would query an archive service.
///
/// # Implementations
///
/// - [`crate::infrastructure::simulation::SimulatedHistoryChecker`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryChecker: Send + Sync {
    /// Returns true when `name + tld` has archived history worth reusing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the underlying lookup fails.
    async fn has_archive_history(&self, name: &str, tld: &str) -> Result<bool, AppError>;
}
