//! Canned name-suggestion collaborator.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::providers::SuggestionClient;
use crate::error::AppError;
use crate::utils::domain_name::sanitize_keyword;

/// Fragment vocabulary combined with the seed keyword.
const FRAGMENT_WORDS: &[&str] = &[
    "ledger", "signal", "orbit", "atlas", "harbor", "beacon", "summit", "forge",
];

/// Offline stand-in for the external text-generation service.
///
/// Returns keyword-themed fragments; construct it with
/// [`CannedSuggestionClient::unavailable`] to exercise the degradation path
/// (generation must fall back to keyword-only naming).
pub struct CannedSuggestionClient {
    available: bool,
}

impl CannedSuggestionClient {
    pub fn new() -> Self {
        Self { available: true }
    }

    /// A client whose every call fails, as an unreachable service would.
    pub fn unavailable() -> Self {
        Self { available: false }
    }
}

impl Default for CannedSuggestionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SuggestionClient for CannedSuggestionClient {
    async fn suggest_names(&self, seed: &str) -> Result<Vec<String>, AppError> {
        if !self.available {
            return Err(AppError::internal(
                "Suggestion service unreachable",
                json!({ "seed": seed }),
            ));
        }

        let root = sanitize_keyword(seed);
        if root.is_empty() {
            return Ok(Vec::new());
        }

        Ok(FRAGMENT_WORDS
            .iter()
            .map(|word| format!("{root}{word}"))
            .collect())
    }
}
