//! Candidate id generation.
//!
//! Ids are random, URL-safe, and opaque; uniqueness within a pipeline run is
//! what matters, not global uniqueness across re-runs.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const ID_LENGTH_BYTES: usize = 9;

/// Generates a random 12-character candidate id.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_id() -> String {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
