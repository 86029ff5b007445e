//! Business logic services for the application layer.

pub mod audit_service;
pub mod crawl_service;
pub mod filter_service;
pub mod penalty_service;
pub mod pipeline_service;

pub use audit_service::AuditService;
pub use crawl_service::{CrawlBatch, CrawlService};
pub use filter_service::{FilterOutcome, FilterService};
pub use penalty_service::{ChunkOutcome, PenaltyService};
pub use pipeline_service::{
    PipelineController, PipelineRun, PipelineService, RunOptions, RunSummary,
};
