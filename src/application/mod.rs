//! Application layer services implementing the pipeline logic.
//!
//! This layer orchestrates domain operations by coordinating provider
//! calls, the lifecycle state machine, and the batching rules. Services
//! consume provider traits and expose a clean API to the CLI.
//!
//! # Available Services
//!
//! - [`services::crawl_service::CrawlService`] - candidate generation with
//!   inline metric synthesis
//! - [`services::filter_service::FilterService`] - threshold qualification
//! - [`services::penalty_service::PenaltyService`] - index/archive trust gate
//! - [`services::pipeline_service::PipelineService`] - the three-phase
//!   chunked scheduler
//! - [`services::audit_service::AuditService`] - advisory report generation

pub mod services;
