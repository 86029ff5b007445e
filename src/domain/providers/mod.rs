//! Provider trait definitions for the domain layer.
//!
//! These traits isolate everything a production deployment would do over
//! the network — archive lookups, registrar availability, backlink metrics,
//! and the text-generation collaborators — behind swappable seams. The
//! pipeline services depend only on the traits.
//!
//! # Architecture
//!
//! - Traits define the contract for external checks and collaborators
//! - Simulated implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Providers
//!
//! - [`HistoryChecker`] - archived-history gate
//! - [`AvailabilityChecker`] - registration-availability gate
//! - [`MetricsProvider`] - authority metrics and marketplace quotes
//! - [`SuggestionClient`] - name-fragment suggestions (best-effort)
//! - [`AuditReporter`] - advisory audit commentary (best-effort)
//! - [`IdentityProvider`] - current-session check

pub mod audit_reporter;
pub mod availability_checker;
pub mod history_checker;
pub mod identity_provider;
pub mod metrics_provider;
pub mod suggestion_client;

pub use audit_reporter::AuditReporter;
pub use availability_checker::AvailabilityChecker;
pub use history_checker::HistoryChecker;
pub use identity_provider::{Identity, IdentityProvider};
pub use metrics_provider::{MetricSample, MetricsProvider, PriceQuote};
pub use suggestion_client::SuggestionClient;

#[cfg(test)]
pub use audit_reporter::MockAuditReporter;
#[cfg(test)]
pub use availability_checker::MockAvailabilityChecker;
#[cfg(test)]
pub use history_checker::MockHistoryChecker;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
#[cfg(test)]
pub use metrics_provider::MockMetricsProvider;
#[cfg(test)]
pub use suggestion_client::MockSuggestionClient;
