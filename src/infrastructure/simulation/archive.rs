//! Simulated archive-history gate.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::providers::HistoryChecker;
use crate::error::AppError;

/// Bernoulli stand-in for an archive lookup.
///
/// In reality most random name/TLD pairs were never archived; the default
/// hit rate of 0.4 keeps the accepted population realistic. Swap this for a
/// real archive client without touching pipeline logic.
pub struct SimulatedHistoryChecker {
    hit_rate: f64,
}

impl SimulatedHistoryChecker {
    /// `hit_rate` must already be validated to `[0, 1]` by the config.
    pub fn new(hit_rate: f64) -> Self {
        Self { hit_rate }
    }
}

#[async_trait]
impl HistoryChecker for SimulatedHistoryChecker {
    async fn has_archive_history(&self, _name: &str, _tld: &str) -> Result<bool, AppError> {
        Ok(rand::rng().random_bool(self.hit_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extreme_rates_are_deterministic() {
        let never = SimulatedHistoryChecker::new(0.0);
        let always = SimulatedHistoryChecker::new(1.0);

        for _ in 0..50 {
            assert!(!never.has_archive_history("crypto", ".com").await.unwrap());
            assert!(always.has_archive_history("crypto", ".com").await.unwrap());
        }
    }
}
