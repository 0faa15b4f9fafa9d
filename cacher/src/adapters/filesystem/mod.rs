//! Filesystem adapter
//!
//! Snapshot store writing to a local directory, for development and for
//! serving the page from a plain web server.

pub mod store;

pub use store::FsSnapshotStore;
