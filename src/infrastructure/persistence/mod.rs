//! Snapshot persistence.
//!
//! The pipeline only needs a lossless keyed snapshot of the entity
//! collection and the active profile; a versioned JSON file provides that
//! with an atomic write path.

pub mod snapshot_store;

pub use snapshot_store::{Snapshot, SnapshotStore, SNAPSHOT_VERSION};
