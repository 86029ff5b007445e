//! Static TLD registration-fee table.
//!
//! Fees approximate retail registrar pricing and serve as the price floor
//! for every synthesized listing: a non-auction candidate is always priced
//! at exactly its TLD's registration fee, an auction listing at the fee plus
//! a premium.

/// Fee applied to TLDs missing from the table.
pub const FALLBACK_REGISTRATION_FEE: f64 = 15.00;

/// TLD → yearly registration fee, currency-agnostic.
const REGISTRATION_FEES: &[(&str, f64)] = &[
    // Common gTLDs
    (".com", 10.28),
    (".net", 11.98),
    (".org", 9.68),
    (".info", 3.98),
    (".biz", 4.98),
    (".co", 23.98),
    (".io", 39.98),
    // Third-level extensions
    (".co.net", 15.00),
    (".uk.net", 12.99),
    (".us.net", 12.99),
    (".co.org", 15.00),
    (".uk.org", 9.50),
    (".jp.net", 14.50),
    (".jp.co", 40.00),
    // Country codes
    (".co.jp", 40.00),
    (".co.uk", 9.48),
    (".org.uk", 9.48),
    (".eu", 6.99),
    (".de", 5.99),
    (".ca", 11.99),
    (".in", 5.99),
    (".me", 18.99),
    // Budget new gTLDs
    (".xyz", 0.99),
    (".site", 1.99),
    (".online", 1.99),
    (".tech", 4.99),
    (".store", 2.99),
];

/// All TLDs the generator may draw from, in table order.
pub fn supported_tlds() -> Vec<&'static str> {
    REGISTRATION_FEES.iter().map(|(tld, _)| *tld).collect()
}

/// Base registration fee for a TLD, falling back to
/// [`FALLBACK_REGISTRATION_FEE`] for unknown extensions.
pub fn registration_fee(tld: &str) -> f64 {
    REGISTRATION_FEES
        .iter()
        .find(|(t, _)| *t == tld)
        .map(|(_, fee)| *fee)
        .unwrap_or(FALLBACK_REGISTRATION_FEE)
}

/// Returns true when the TLD is in the supported set.
pub fn is_supported_tld(tld: &str) -> bool {
    REGISTRATION_FEES.iter().any(|(t, _)| *t == tld)
}
