//! Simulated provider implementations.
//!
//! Random draws standing in for the network calls a production deployment
//! would make: archive lookups, registrar availability, backlink metrics,
//! and marketplace feeds. Each implementation is the designated swap point
//! for the real integration.

pub mod archive;
pub mod availability;
pub mod metrics;

pub use archive::SimulatedHistoryChecker;
pub use availability::SimulatedAvailabilityChecker;
pub use metrics::SimulatedMetricsProvider;
