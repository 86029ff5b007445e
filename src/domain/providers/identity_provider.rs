//! Provider trait for the authenticated-identity check.

use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The currently authenticated operator, as reported by the surrounding
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub operator: String,
    pub license_key: Option<String>,
}

/// Session check exposed by the surrounding application.
///
/// The pipeline does not manage authentication itself; it only refuses to
/// start without a current identity.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::EnvIdentityProvider`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current identity, or `None` when no session exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the check itself fails.
    async fn current_identity(&self) -> Result<Option<Identity>, AppError>;
}
