//! Snapshot store port trait
//!
//! Defines the write-only interface for publishing a rendered snapshot.
//! There is no read path: the last committed scoreboard is tracked in-process.

use async_trait::async_trait;

use crate::error::StoreError;

/// Port trait for the cache sink
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist a rendered payload as the new visible snapshot.
    async fn commit(&self, payload: &[u8]) -> Result<(), StoreError>;
}
