//! JSON snapshot persistence for the inventory and profile.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{DomainCandidate, FilterProfile};
use crate::domain::inventory::Inventory;
use crate::error::{AppError, map_io_error};

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A lossless keyed snapshot of one pipeline dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub seed_keyword: Option<String>,
    pub profile: FilterProfile,
    pub candidates: Vec<DomainCandidate>,
    pub selected_ids: Vec<String>,
}

impl Snapshot {
    /// Captures the current dataset.
    pub fn capture(
        seed_keyword: Option<String>,
        profile: &FilterProfile,
        inventory: &Inventory,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            seed_keyword,
            profile: profile.clone(),
            candidates: inventory.candidates().to_vec(),
            selected_ids: inventory.selected_ids(),
        }
    }

    /// Rebuilds the inventory and profile from the snapshot.
    pub fn restore(self) -> (Inventory, FilterProfile, Option<String>) {
        let inventory = Inventory::from_parts(self.candidates, self.selected_ids);
        (inventory, self.profile, self.seed_keyword)
    }
}

/// Saves and loads snapshots at a fixed path.
///
/// Writes go through a sibling temp file followed by a rename, so a crash
/// mid-save never corrupts the previous snapshot.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on serialization or I/O failure.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(snapshot).map_err(|e| {
            AppError::internal(
                "Failed to serialize snapshot",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &payload)
            .await
            .map_err(|e| map_io_error("snapshot save", e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| map_io_error("snapshot save", e))?;

        tracing::info!(
            path = %self.path.display(),
            candidates = snapshot.candidates.len(),
            "snapshot saved"
        );

        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no snapshot exists at the path,
    /// [`AppError::Validation`] for an unreadable or incompatible file.
    pub async fn load(&self) -> Result<Snapshot, AppError> {
        let payload = tokio::fs::read(&self.path)
            .await
            .map_err(|e| map_io_error("snapshot load", e))?;

        let snapshot: Snapshot = serde_json::from_slice(&payload).map_err(|e| {
            AppError::bad_request(
                "Snapshot file is not valid JSON",
                json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AppError::bad_request(
                "Snapshot version is not supported",
                json!({ "found": snapshot.version, "expected": SNAPSHOT_VERSION }),
            ));
        }

        Ok(snapshot)
    }
}
