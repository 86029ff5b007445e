//! Application state wiring the pipeline together.

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::application::services::{AuditService, CrawlService, PipelineService};
use crate::config::Config;
use crate::domain::inventory::Inventory;
use crate::domain::pipeline_event::PipelineEvent;
use crate::infrastructure::audit::TemplateAuditReporter;
use crate::infrastructure::export::CsvExporter;
use crate::infrastructure::identity::EnvIdentityProvider;
use crate::infrastructure::persistence::SnapshotStore;
use crate::infrastructure::simulation::{
    SimulatedAvailabilityChecker, SimulatedHistoryChecker, SimulatedMetricsProvider,
};
use crate::infrastructure::suggestions::CannedSuggestionClient;

/// The pipeline service assembled over the simulated providers.
pub type SimulatedPipeline = PipelineService<
    SimulatedHistoryChecker,
    SimulatedAvailabilityChecker,
    SimulatedMetricsProvider,
    CannedSuggestionClient,
>;

/// Composition root: the shared inventory plus every assembled service.
pub struct AppState {
    pub config: Config,
    pub inventory: Arc<RwLock<Inventory>>,
    pub pipeline: SimulatedPipeline,
    pub audit: AuditService<TemplateAuditReporter>,
    pub identity: EnvIdentityProvider,
    pub exporter: CsvExporter,
    pub snapshots: SnapshotStore,
}

impl AppState {
    /// Builds the application state and the progress event receiver.
    pub fn new(config: Config) -> (Self, mpsc::Receiver<PipelineEvent>) {
        let inventory = Arc::new(RwLock::new(Inventory::new()));
        let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);

        let sim = config.simulation;
        let crawl = CrawlService::new(
            Arc::new(SimulatedHistoryChecker::new(sim.archive_hit_rate)),
            Arc::new(SimulatedAvailabilityChecker::new(sim.availability_rate)),
            Arc::new(SimulatedMetricsProvider::new(
                sim.indexed_rate,
                sim.wayback_clean_rate,
                sim.auction_rate,
            )),
            sim.suggestion_rate,
        );

        let pipeline = PipelineService::new(
            crawl,
            Arc::new(CannedSuggestionClient::new()),
            Arc::clone(&inventory),
            event_tx,
            Duration::from_millis(config.tick_interval_ms),
        );

        let audit = AuditService::new(Arc::new(TemplateAuditReporter::new()));
        let snapshots = SnapshotStore::new(config.snapshot_path.clone());

        (
            Self {
                config,
                inventory,
                pipeline,
                audit,
                identity: EnvIdentityProvider::new(),
                exporter: CsvExporter::new(),
                snapshots,
            },
            event_rx,
        )
    }
}
