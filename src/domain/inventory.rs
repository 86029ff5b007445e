//! In-memory candidate inventory.
//!
//! One owned collection touched by every pipeline stage: append-only from
//! the generator's perspective, mutated in place (status and progress only)
//! by the filter and verifier, and read by exporters and the CLI. All
//! status changes go through [`Inventory::transition`] so the lifecycle
//! graph is enforced in one place.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{CandidateStatus, DomainCandidate};
use crate::error::AppError;

/// Hard cap on held candidates; appending past it drops the oldest entries.
pub const MAX_CANDIDATES: usize = 500_000;

/// Aggregate counters over the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_found: usize,
    pub passed_filters: usize,
    pub clean_domains: usize,
    pub penalized: usize,
    pub rejected: usize,
    pub ignored: usize,
}

#[derive(Debug, Default)]
pub struct Inventory {
    candidates: Vec<DomainCandidate>,
    index: HashMap<String, usize>,
    selected: HashSet<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an inventory from snapshot parts. Selection entries that do
    /// not match a held candidate are dropped.
    pub fn from_parts(candidates: Vec<DomainCandidate>, selected_ids: Vec<String>) -> Self {
        let mut inventory = Self::new();
        inventory.append_batch(candidates);
        for id in selected_ids {
            if inventory.index.contains_key(&id) {
                inventory.selected.insert(id);
            }
        }
        inventory
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[DomainCandidate] {
        &self.candidates
    }

    pub fn get(&self, id: &str) -> Option<&DomainCandidate> {
        self.index.get(id).map(|&i| &self.candidates[i])
    }

    /// Appends a freshly generated batch in insertion order.
    ///
    /// When the cap is exceeded the oldest entries are evicted first, so a
    /// long-running append-mode hunt keeps the newest finds.
    pub fn append_batch(&mut self, batch: Vec<DomainCandidate>) {
        for candidate in batch {
            if self.index.contains_key(&candidate.id) {
                continue;
            }
            self.index
                .insert(candidate.id.clone(), self.candidates.len());
            self.candidates.push(candidate);
        }

        if self.candidates.len() > MAX_CANDIDATES {
            let overflow = self.candidates.len() - MAX_CANDIDATES;
            for evicted in self.candidates.drain(..overflow) {
                self.selected.remove(&evicted.id);
            }
            self.rebuild_index();
        }
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
    }

    /// Moves one candidate forward through the lifecycle graph.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::Conflict`] for an illegal transition.
    pub fn transition(&mut self, id: &str, next: CandidateStatus) -> Result<(), AppError> {
        let &i = self
            .index
            .get(id)
            .ok_or_else(|| AppError::not_found("Candidate not found", json!({ "id": id })))?;

        self.candidates[i].transition(next)?;

        if next != CandidateStatus::Clean {
            self.selected.remove(id);
        }

        Ok(())
    }

    /// Updates the advisory verification progress. Unknown ids are ignored.
    pub fn set_check_progress(&mut self, id: &str, progress: u8) {
        if let Some(&i) = self.index.get(id) {
            self.candidates[i].check_progress = progress.min(100);
        }
    }

    /// User action: drops the candidate from further consideration.
    ///
    /// Allowed from `Pending`, `Analyzing`, and `Clean` only — the lifecycle
    /// graph refuses the rest.
    ///
    /// # Errors
    ///
    /// See [`Inventory::transition`].
    pub fn ignore(&mut self, id: &str) -> Result<(), AppError> {
        self.transition(id, CandidateStatus::Ignored)
    }

    /// Toggles export selection for a clean candidate; returns the new
    /// selection state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::Conflict`] when the candidate is not `Clean`.
    pub fn toggle_selected(&mut self, id: &str) -> Result<bool, AppError> {
        let candidate = self
            .get(id)
            .ok_or_else(|| AppError::not_found("Candidate not found", json!({ "id": id })))?;

        if !candidate.is_clean() {
            return Err(AppError::conflict(
                "Only clean candidates can be selected",
                json!({ "id": id, "status": candidate.status.label() }),
            ));
        }

        if self.selected.remove(id) {
            Ok(false)
        } else {
            self.selected.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn select_all_clean(&mut self) {
        self.selected = self
            .candidates
            .iter()
            .filter(|c| c.is_clean())
            .map(|c| c.id.clone())
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in insertion order, for snapshots.
    pub fn selected_ids(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|c| self.selected.contains(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn clean(&self) -> impl Iterator<Item = &DomainCandidate> {
        self.candidates.iter().filter(|c| c.is_clean())
    }

    /// The export set: the selected clean subset when anything is selected,
    /// otherwise every clean candidate.
    pub fn export_candidates(&self) -> Vec<&DomainCandidate> {
        if self.selected.is_empty() {
            self.clean().collect()
        } else {
            self.clean()
                .filter(|c| self.selected.contains(&c.id))
                .collect()
        }
    }

    pub fn count_with_status(&self, status: CandidateStatus) -> usize {
        self.candidates.iter().filter(|c| c.status == status).count()
    }

    /// Ids of candidates in `status`, in collection order.
    pub fn ids_with_status(&self, status: CandidateStatus) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|c| c.status == status)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Up to `limit` ids of candidates in `status`, in collection order.
    pub fn take_with_status(&self, status: CandidateStatus, limit: usize) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|c| c.status == status)
            .take(limit)
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            total_found: self.candidates.len(),
            ..Stats::default()
        };

        for candidate in &self.candidates {
            match candidate.status {
                CandidateStatus::Analyzing => stats.passed_filters += 1,
                CandidateStatus::Clean => {
                    stats.passed_filters += 1;
                    stats.clean_domains += 1;
                }
                CandidateStatus::Penalized => {
                    stats.passed_filters += 1;
                    stats.penalized += 1;
                }
                CandidateStatus::Rejected => stats.rejected += 1,
                CandidateStatus::Ignored => stats.ignored += 1,
                CandidateStatus::Pending => {}
            }
        }

        stats
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.index.clear();
        self.selected.clear();
    }
}
