//! Provider trait for registration-availability lookups.

use crate::error::AppError;
use async_trait::async_trait;

/// Answers whether a domain is currently unregistered and buyable.
///
/// The second availability gate: a candidate with archive history is only
/// kept when it can actually be acquired. The bundled implementation
/// simulates the check; a real one would ask a registrar or drop-catch API.
///
/// # Implementations
///
/// - [`crate::infrastructure::simulation::SimulatedAvailabilityChecker`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    /// Returns true when `name + tld` is currently available for purchase.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the underlying lookup fails.
    async fn is_available(&self, name: &str, tld: &str) -> Result<bool, AppError>;
}
