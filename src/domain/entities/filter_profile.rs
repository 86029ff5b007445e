//! Qualification threshold profile.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::AppError;
use crate::utils::domain_name::normalize_tld;

/// Per-metric minimum thresholds plus price ceiling and content policy.
///
/// An empty `allowed_tlds` list means every supported TLD passes. Entries
/// are kept normalized (lowercase, leading dot) by [`FilterProfile::allow_tld`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterProfile {
    #[validate(range(max = 100))]
    pub min_domain_rating: u8,

    #[validate(range(max = 100))]
    pub min_url_rating: u8,

    #[validate(range(max = 500))]
    pub min_referring_domains: u16,

    #[validate(range(max = 100))]
    pub min_trust_flow: u8,

    #[validate(range(max = 100))]
    pub min_citation_flow: u8,

    #[validate(range(min = 0.01))]
    pub max_price: f64,

    /// When set, candidates with spam anchor text never qualify.
    pub exclude_spam_anchors: bool,

    pub allowed_tlds: Vec<String>,
}

impl Default for FilterProfile {
    fn default() -> Self {
        Self {
            min_domain_rating: 10,
            min_url_rating: 10,
            min_referring_domains: 5,
            min_trust_flow: 5,
            min_citation_flow: 5,
            max_price: 35.0,
            exclude_spam_anchors: true,
            allowed_tlds: Vec::new(),
        }
    }
}

impl FilterProfile {
    /// Adds a TLD to the allow-list, normalizing it first. Duplicates are
    /// silently skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the input is not a valid TLD.
    pub fn allow_tld(&mut self, raw: &str) -> Result<(), AppError> {
        let tld = normalize_tld(raw)?;
        if !self.allowed_tlds.contains(&tld) {
            self.allowed_tlds.push(tld);
        }
        Ok(())
    }

    pub fn disallow_tld(&mut self, tld: &str) {
        self.allowed_tlds.retain(|t| t != tld);
    }

    /// True when the TLD passes the allow-list (empty list = unrestricted).
    pub fn permits_tld(&self, tld: &str) -> bool {
        self.allowed_tlds.is_empty() || self.allowed_tlds.iter().any(|t| t == tld)
    }

    /// Full profile validation: derived range checks plus TLD shape.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing the offending fields.
    pub fn validate_profile(&self) -> Result<(), AppError> {
        self.validate().map_err(|e| {
            AppError::bad_request(
                "Filter profile has out-of-range thresholds",
                json!({ "fields": e.field_errors().keys().cloned().collect::<Vec<_>>() }),
            )
        })?;

        for tld in &self.allowed_tlds {
            let normalized = normalize_tld(tld)?;
            if &normalized != tld {
                return Err(AppError::bad_request(
                    "Allow-list TLD is not normalized",
                    json!({ "tld": tld, "expected": normalized }),
                ));
            }
        }

        Ok(())
    }
}
