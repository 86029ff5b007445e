//! Provider trait for the external name-suggestion collaborator.

use crate::error::AppError;
use async_trait::async_trait;

/// Text-generation collaborator that proposes name fragments for a seed
/// keyword.
///
/// Strictly best-effort: a failing or empty result must never abort
/// generation — the pipeline falls back to keyword-derived names.
///
/// # Implementations
///
/// - [`crate::infrastructure::suggestions::CannedSuggestionClient`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Returns a small list of plausible name fragments for the seed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the service is unreachable;
    /// callers degrade to keyword-only naming.
    async fn suggest_names(&self, seed: &str) -> Result<Vec<String>, AppError>;
}
