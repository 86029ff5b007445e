//! Core domain entities representing the pipeline's data model.
//!
//! # Entity Types
//!
//! - [`DomainCandidate`] - an expired-domain candidate with synthesized
//!   metrics, trust signals, and commercial terms
//! - [`CandidateStatus`] - the forward-only lifecycle state machine
//! - [`FilterProfile`] - user-configurable qualification thresholds
//!
//! All entities include unit tests demonstrating their construction and the
//! legal lifecycle moves.

pub mod candidate;
pub mod filter_profile;

pub use candidate::{
    AnchorStatus, AuthorityMetrics, CandidateStatus, DomainCandidate, Marketplace,
};
pub use filter_profile::FilterProfile;
