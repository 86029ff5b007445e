//! Environment-based identity provider.

use async_trait::async_trait;
use std::env;

use crate::domain::providers::{Identity, IdentityProvider};
use crate::error::AppError;

/// Default environment variable naming the operator.
pub const OPERATOR_VAR: &str = "HUNTER_OPERATOR";
/// Default environment variable carrying the license key.
pub const LICENSE_VAR: &str = "HUNTER_LICENSE_KEY";

/// Reads the current identity from environment variables.
///
/// Stands in for the surrounding application's session check: the operator
/// variable names who is logged in, the license variable is optional.
pub struct EnvIdentityProvider {
    operator_var: String,
    license_var: String,
}

impl EnvIdentityProvider {
    pub fn new() -> Self {
        Self {
            operator_var: OPERATOR_VAR.to_string(),
            license_var: LICENSE_VAR.to_string(),
        }
    }

    /// Overrides the variable names, mainly for tests.
    pub fn with_vars(operator_var: impl Into<String>, license_var: impl Into<String>) -> Self {
        Self {
            operator_var: operator_var.into(),
            license_var: license_var.into(),
        }
    }
}

impl Default for EnvIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for EnvIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, AppError> {
        let operator = match env::var(&self.operator_var) {
            Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => return Ok(None),
        };

        let license_key = env::var(&self.license_var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Some(Identity {
            operator,
            license_key,
        }))
    }
}
