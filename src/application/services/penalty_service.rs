//! Penalty verification: the final trust gate over qualified candidates.

use crate::domain::entities::CandidateStatus;
use crate::domain::inventory::Inventory;
use crate::error::AppError;

/// Floor on the verification chunk size.
pub const MIN_CHUNK: usize = 50;
/// Chunk size aims at roughly this many chunks per run.
const CHUNK_DIVISOR: usize = 20;

/// Counts from one verification chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub verified: usize,
    pub clean: usize,
    pub penalized: usize,
    /// Candidates still awaiting verification after this chunk.
    pub remaining: usize,
}

/// Verifies qualified candidates against the penalty signals.
///
/// A candidate is `Clean` iff it is indexed *and* its archive history is
/// clean; authority metrics are deliberately ignored — a high-authority
/// domain with dirty history is still penalized.
#[derive(Debug, Default)]
pub struct PenaltyService;

impl PenaltyService {
    pub fn new() -> Self {
        Self
    }

    /// Chunk size for a population of `total` candidates, floored so small
    /// runs do not degenerate into per-item chunks.
    pub fn chunk_size(total: usize) -> usize {
        std::cmp::max(MIN_CHUNK, total / CHUNK_DIVISOR)
    }

    /// Verifies up to `chunk_size` candidates currently in `Analyzing`, in
    /// collection order.
    ///
    /// # Errors
    ///
    /// Propagates inventory transition failures; with a well-formed
    /// inventory these cannot occur.
    pub fn verify_chunk(
        &self,
        inventory: &mut Inventory,
        chunk_size: usize,
    ) -> Result<ChunkOutcome, AppError> {
        let ids = inventory.take_with_status(CandidateStatus::Analyzing, chunk_size);
        let mut outcome = ChunkOutcome::default();

        for id in &ids {
            let is_safe = inventory
                .get(id)
                .map(|c| c.indexed && c.wayback_clean)
                .unwrap_or(false);

            let next = if is_safe {
                CandidateStatus::Clean
            } else {
                CandidateStatus::Penalized
            };

            inventory.transition(id, next)?;
            inventory.set_check_progress(id, 100);

            outcome.verified += 1;
            if is_safe {
                outcome.clean += 1;
            } else {
                outcome.penalized += 1;
            }
        }

        outcome.remaining = inventory.count_with_status(CandidateStatus::Analyzing);

        tracing::debug!(
            verified = outcome.verified,
            clean = outcome.clean,
            penalized = outcome.penalized,
            remaining = outcome.remaining,
            "penalty chunk verified"
        );

        Ok(outcome)
    }
}
