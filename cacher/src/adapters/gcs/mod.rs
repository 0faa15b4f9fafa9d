//! Google Cloud Storage adapter
//!
//! Implementation of the snapshot store for a public GCS bucket.

pub mod store;

pub use store::GcsSnapshotStore;
