//! Three-phase batch scheduler driving the pipeline.
//!
//! Crawl, Filter, and Verify run as one owned tokio task, each phase
//! internally chunked: a chunk reads the shared inventory, computes one
//! batch of work, publishes the result, and yields before the next chunk is
//! scheduled. A phase never starts until the previous one has fully
//! processed its population. Cancellation is cooperative — the watch flag
//! is checked at every chunk boundary, and an in-flight batch collected
//! after cancellation is discarded rather than appended.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use serde_json::json;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::application::services::crawl_service::CrawlService;
use crate::application::services::filter_service::FilterService;
use crate::application::services::penalty_service::PenaltyService;
use crate::domain::entities::{CandidateStatus, FilterProfile};
use crate::domain::inventory::{Inventory, Stats};
use crate::domain::pipeline_event::{PipelineEvent, PipelinePhase};
use crate::domain::providers::{
    AvailabilityChecker, HistoryChecker, MetricsProvider, SuggestionClient,
};
use crate::error::AppError;
use crate::utils::domain_name::{has_digit_run, sanitize_keyword};

/// Crawl chunk size by target, as in the original batching scheme.
const LARGE_TARGET: usize = 100_000;
const LARGE_BATCH: usize = 5_000;
const SMALL_BATCH: usize = 500;

/// Consecutive zero-yield crawl chunks tolerated before the phase gives up.
const MAX_EMPTY_CHUNKS: usize = 25;

/// Parameters of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub seed_keyword: String,
    /// How many candidates the crawl phase should accept.
    pub target: usize,
    /// Keep the existing inventory and crawl on top of it.
    pub append: bool,
    pub profile: FilterProfile,
}

/// Terminal outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cancelled: bool,
    pub stats: Stats,
}

/// Cancels a running pipeline. Cancelling an already-finished run is a
/// no-op.
#[derive(Debug)]
pub struct PipelineController {
    cancel_tx: watch::Sender<bool>,
}

impl PipelineController {
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }
}

/// A started run: the cancellation handle plus the join handle resolving to
/// the run summary.
#[derive(Debug)]
pub struct PipelineRun {
    pub controller: PipelineController,
    pub handle: JoinHandle<Result<RunSummary, AppError>>,
}

/// Owns the shared inventory and drives runs over it, one at a time.
pub struct PipelineService<H, A, M, S>
where
    H: HistoryChecker + 'static,
    A: AvailabilityChecker + 'static,
    M: MetricsProvider + 'static,
    S: SuggestionClient + 'static,
{
    crawl: Arc<CrawlService<H, A, M>>,
    suggestion_client: Arc<S>,
    inventory: Arc<RwLock<Inventory>>,
    events: mpsc::Sender<PipelineEvent>,
    tick: Duration,
    active: Arc<AtomicBool>,
}

impl<H, A, M, S> PipelineService<H, A, M, S>
where
    H: HistoryChecker + 'static,
    A: AvailabilityChecker + 'static,
    M: MetricsProvider + 'static,
    S: SuggestionClient + 'static,
{
    pub fn new(
        crawl: CrawlService<H, A, M>,
        suggestion_client: Arc<S>,
        inventory: Arc<RwLock<Inventory>>,
        events: mpsc::Sender<PipelineEvent>,
        tick: Duration,
    ) -> Self {
        Self {
            crawl: Arc::new(crawl),
            suggestion_client,
            inventory,
            events,
            tick,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn inventory(&self) -> Arc<RwLock<Inventory>> {
        Arc::clone(&self.inventory)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Validates the options and spawns the run task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unusable seed, a zero
    /// target, or an invalid profile, and [`AppError::Conflict`] when a run
    /// is already active.
    pub fn start(&self, options: RunOptions) -> Result<PipelineRun, AppError> {
        options.profile.validate_profile()?;

        let seed_root = sanitize_keyword(&options.seed_keyword);
        if seed_root.is_empty() {
            return Err(AppError::bad_request(
                "Seed keyword must contain letters or digits",
                json!({ "seed": options.seed_keyword }),
            ));
        }
        if options.target == 0 {
            return Err(AppError::bad_request(
                "Scan target must be at least 1",
                json!({}),
            ));
        }

        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::conflict(
                "A pipeline run is already active",
                json!({}),
            ));
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);

        let worker = Worker {
            crawl: Arc::clone(&self.crawl),
            suggestion_client: Arc::clone(&self.suggestion_client),
            inventory: Arc::clone(&self.inventory),
            events: self.events.clone(),
            tick: self.tick,
            options,
            seed_root,
            cancel_rx,
        };

        let active = Arc::clone(&self.active);
        let handle = tokio::spawn(async move {
            let _guard = ActiveGuard(active);
            worker.run().await
        });

        Ok(PipelineRun {
            controller: PipelineController { cancel_tx },
            handle,
        })
    }
}

/// Releases the active-run flag even when the task errors.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct Worker<H, A, M, S>
where
    H: HistoryChecker,
    A: AvailabilityChecker,
    M: MetricsProvider,
    S: SuggestionClient,
{
    crawl: Arc<CrawlService<H, A, M>>,
    suggestion_client: Arc<S>,
    inventory: Arc<RwLock<Inventory>>,
    events: mpsc::Sender<PipelineEvent>,
    tick: Duration,
    options: RunOptions,
    seed_root: String,
    cancel_rx: watch::Receiver<bool>,
}

impl<H, A, M, S> Worker<H, A, M, S>
where
    H: HistoryChecker,
    A: AvailabilityChecker,
    M: MetricsProvider,
    S: SuggestionClient,
{
    async fn run(self) -> Result<RunSummary, AppError> {
        self.emit(PipelineEvent::CrawlStarted {
            seed_keyword: self.options.seed_keyword.clone(),
            target: self.options.target,
            append: self.options.append,
        })
        .await;

        let suggestions = self.load_suggestions().await;

        if !self.options.append {
            self.store().clear();
        }

        if let Some(summary) = self.crawl_phase(&suggestions).await? {
            return Ok(summary);
        }
        if let Some(summary) = self.filter_phase().await? {
            return Ok(summary);
        }
        if let Some(summary) = self.verify_phase().await? {
            return Ok(summary);
        }

        let stats = self.stats();
        self.emit(PipelineEvent::RunCompleted { stats }).await;
        tracing::info!(
            total = stats.total_found,
            clean = stats.clean_domains,
            "pipeline run completed"
        );

        Ok(RunSummary {
            cancelled: false,
            stats,
        })
    }

    /// Fetches name fragments from the collaborator, degrading to an empty
    /// list. Fragments are reduced to their first label and sanitized.
    async fn load_suggestions(&self) -> Vec<String> {
        let strategy = FixedInterval::from_millis(200).take(2);
        let fetched = Retry::spawn(strategy, || {
            self.suggestion_client
                .suggest_names(&self.options.seed_keyword)
        })
        .await;

        match fetched {
            Ok(raw) => {
                let fragments: Vec<String> = raw
                    .iter()
                    .filter_map(|s| s.split('.').next())
                    .map(sanitize_keyword)
                    .filter(|s| !s.is_empty() && !has_digit_run(s))
                    .collect();

                self.emit(PipelineEvent::SuggestionsLoaded {
                    count: fragments.len(),
                })
                .await;
                fragments
            }
            Err(e) => {
                tracing::warn!(error = %e, "suggestion collaborator unavailable, falling back to keyword-only naming");
                self.emit(PipelineEvent::SuggestionsUnavailable {
                    reason: e.to_string(),
                })
                .await;
                Vec::new()
            }
        }
    }

    async fn crawl_phase(&self, suggestions: &[String]) -> Result<Option<RunSummary>, AppError> {
        let target = self.options.target;
        let batch_size = if target > LARGE_TARGET {
            LARGE_BATCH
        } else {
            SMALL_BATCH
        };

        let mut accepted = 0usize;
        let mut chunk_index = 0usize;
        let mut empty_chunks = 0usize;

        while accepted < target {
            if self.cancelled() {
                return Ok(Some(self.finish_cancelled(PipelinePhase::Crawl).await));
            }

            let requested = batch_size.min(target - accepted);
            let batch = self
                .crawl
                .collect_batch(&self.seed_root, suggestions, requested)
                .await?;

            if self.cancelled() {
                // The batch was collected after the reset; dropping it keeps
                // the cancelled dataset exactly as the user last saw it.
                return Ok(Some(self.finish_cancelled(PipelinePhase::Crawl).await));
            }

            if batch.candidates.is_empty() {
                empty_chunks += 1;
                if empty_chunks >= MAX_EMPTY_CHUNKS {
                    tracing::warn!(
                        accepted,
                        target,
                        "availability gates yielded nothing for too long, ending crawl early"
                    );
                    break;
                }
            } else {
                empty_chunks = 0;
            }

            accepted += batch.candidates.len();
            self.store().append_batch(batch.candidates);

            chunk_index += 1;
            if chunk_index % 2 == 0 {
                self.emit(PipelineEvent::CrawlProgress { accepted, target })
                    .await;
            }

            sleep(self.tick).await;
        }

        let total_in_inventory = self.store_len();
        self.emit(PipelineEvent::CrawlCompleted {
            accepted,
            total_in_inventory,
        })
        .await;

        Ok(None)
    }

    async fn filter_phase(&self) -> Result<Option<RunSummary>, AppError> {
        if self.cancelled() {
            return Ok(Some(self.finish_cancelled(PipelinePhase::Filter).await));
        }

        let pending = self.count_status(CandidateStatus::Pending);
        self.emit(PipelineEvent::FilterStarted { pending }).await;

        let outcome = FilterService::new().apply(&mut self.store(), &self.options.profile)?;

        self.emit(PipelineEvent::FilterCompleted {
            passed: outcome.passed,
            rejected: outcome.rejected,
        })
        .await;

        sleep(self.tick).await;
        Ok(None)
    }

    async fn verify_phase(&self) -> Result<Option<RunSummary>, AppError> {
        let pending = self.count_status(CandidateStatus::Analyzing);
        self.emit(PipelineEvent::VerificationStarted { pending }).await;

        if pending == 0 {
            self.emit(PipelineEvent::VerificationCompleted {
                clean: 0,
                penalized: 0,
            })
            .await;
            return Ok(None);
        }

        let chunk_size = PenaltyService::chunk_size(pending);
        let service = PenaltyService::new();

        let mut checked = 0usize;
        let mut clean = 0usize;
        let mut penalized = 0usize;
        let mut chunk_index = 0usize;

        loop {
            if self.cancelled() {
                return Ok(Some(self.finish_cancelled(PipelinePhase::Verify).await));
            }

            let outcome = service.verify_chunk(&mut self.store(), chunk_size)?;
            checked += outcome.verified;
            clean += outcome.clean;
            penalized += outcome.penalized;

            chunk_index += 1;
            if chunk_index % 5 == 0 {
                self.emit(PipelineEvent::VerificationProgress { checked, pending })
                    .await;
            }

            if outcome.remaining == 0 {
                break;
            }

            sleep(self.tick).await;
        }

        self.emit(PipelineEvent::VerificationCompleted { clean, penalized })
            .await;

        Ok(None)
    }

    async fn finish_cancelled(&self, phase: PipelinePhase) -> RunSummary {
        let stats = self.stats();
        tracing::info!(phase = phase.label(), "pipeline run cancelled");
        self.emit(PipelineEvent::RunCancelled { phase, stats }).await;

        RunSummary {
            cancelled: true,
            stats,
        }
    }

    fn cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    async fn emit(&self, event: PipelineEvent) {
        self.events.send(event).await.ok();
    }

    fn store(&self) -> RwLockWriteGuard<'_, Inventory> {
        self.inventory.write().expect("inventory lock poisoned")
    }

    fn store_len(&self) -> usize {
        self.inventory.read().expect("inventory lock poisoned").len()
    }

    fn count_status(&self, status: CandidateStatus) -> usize {
        self.inventory
            .read()
            .expect("inventory lock poisoned")
            .count_with_status(status)
    }

    fn stats(&self) -> Stats {
        self.inventory.read().expect("inventory lock poisoned").stats()
    }
}
