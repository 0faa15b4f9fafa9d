//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod filesystem;
pub mod gcs;
pub mod reddit;

pub use filesystem::FsSnapshotStore;
pub use gcs::GcsSnapshotStore;
pub use reddit::RedditFeedClient;
