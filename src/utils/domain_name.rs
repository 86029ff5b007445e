//! Domain-name sanitation and shape rules.
//!
//! Keeps the keyword-to-label normalization and the spam-looking-name rules
//! in one place so the generator and the profile validation agree on them.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Compiled regex for runs of four or more digits.
static DIGIT_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4,}").unwrap());

/// Compiled regex for TLD shape: one or two lowercase labels, each starting
/// with a letter (e.g. `.com`, `.co.uk`, `.jp.net`).
static TLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.[a-z][a-z0-9]{1,15}(\.[a-z][a-z0-9]{1,15})?$").unwrap());

/// Reduces a free-text seed keyword to a usable name root.
///
/// Strips everything but lowercase ASCII alphanumerics; uppercase input is
/// lowercased first. May return an empty string for keywords with no usable
/// characters — callers must treat that as invalid input.
pub fn sanitize_keyword(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Returns true if the label contains a run of four or more consecutive
/// digits. Such names read like auto-incremented spam and are never emitted
/// by the generator.
pub fn has_digit_run(label: &str) -> bool {
    DIGIT_RUN_REGEX.is_match(label)
}

/// Normalizes a user-supplied TLD to canonical form.
///
/// # Rules
///
/// - Trimmed and lowercased
/// - A leading dot is added when missing
/// - Must match the supported shape (one or two short labels)
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the result does not look like a TLD.
pub fn normalize_tld(raw: &str) -> Result<String, AppError> {
    let mut tld = raw.trim().to_lowercase();
    if tld.is_empty() {
        return Err(AppError::bad_request("TLD must not be empty", json!({})));
    }
    if !tld.starts_with('.') {
        tld = format!(".{tld}");
    }

    if !TLD_REGEX.is_match(&tld) {
        return Err(AppError::bad_request(
            "TLD must be one or two short lowercase labels",
            json!({ "tld": tld }),
        ));
    }

    Ok(tld)
}
