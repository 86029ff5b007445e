//! Simulated registration-availability gate.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::providers::AvailabilityChecker;
use crate::error::AppError;

/// Bernoulli stand-in for a registrar availability check.
///
/// Only a small share of archived domains are currently dropped and
/// buyable; the default rate of 0.2 models that. Swap this for a real
/// registrar or drop-catch client without touching pipeline logic.
pub struct SimulatedAvailabilityChecker {
    availability_rate: f64,
}

impl SimulatedAvailabilityChecker {
    /// `availability_rate` must already be validated to `[0, 1]` by the
    /// config.
    pub fn new(availability_rate: f64) -> Self {
        Self { availability_rate }
    }
}

#[async_trait]
impl AvailabilityChecker for SimulatedAvailabilityChecker {
    async fn is_available(&self, _name: &str, _tld: &str) -> Result<bool, AppError> {
        Ok(rand::rng().random_bool(self.availability_rate))
    }
}
