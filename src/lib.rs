//! # Domain Hunter
//!
//! Expired-domain discovery, qualification, and vetting pipeline for
//! link-building inventory.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Candidate entities, the lifecycle
//!   state machine, provider traits, and the inventory store
//! - **Application Layer** ([`application`]) - The four pipeline stages and
//!   the chunked batch scheduler
//! - **Infrastructure Layer** ([`infrastructure`]) - Simulated providers,
//!   collaborator stand-ins, snapshot persistence, and the CSV export sink
//!
//! ## Pipeline
//!
//! A run moves every candidate through three phases:
//!
//! 1. **Crawl** - synthesize plausible names, gate them on archive history
//!    and registration availability, attach metrics and a price
//! 2. **Filter** - apply the threshold profile; survivors become
//!    `Analyzing`, the rest become terminal `Rejected`
//! 3. **Verify** - the penalty gate: `Clean` iff indexed with a clean
//!    archive history, otherwise `Penalized`
//!
//! Work is chunked on a tokio task with progress events over a channel and
//! cooperative cancellation at every chunk boundary.
//!
//! ## Quick Start
//!
//! ```bash
//! # Identify the operator (the CLI refuses to run without a session)
//! export HUNTER_OPERATOR="you@example.com"
//!
//! # Run the interactive hunt
//! cargo run -- hunt --seed crypto --target 5000
//! ```
//!
//! ## Configuration
//!
//! Settings are loaded from environment variables via [`config::Config`].
//! See the [`config`] module for available options and simulation rates.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuditService, CrawlService, FilterService, PenaltyService, PipelineService, RunOptions,
        RunSummary,
    };
    pub use crate::config::{Config, SimulationConfig};
    pub use crate::domain::entities::{
        AnchorStatus, AuthorityMetrics, CandidateStatus, DomainCandidate, FilterProfile,
        Marketplace,
    };
    pub use crate::domain::inventory::{Inventory, Stats};
    pub use crate::domain::pipeline_event::{PipelineEvent, PipelinePhase};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
