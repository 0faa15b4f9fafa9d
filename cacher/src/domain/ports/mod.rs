//! Domain ports (traits)
//!
//! Port traits define interfaces that the core requires.
//! Adapters provide concrete implementations of these traits.

pub mod feed_source;
pub mod renderer;
pub mod snapshot_store;

pub use feed_source::FeedSource;
pub use renderer::PageRenderer;
pub use snapshot_store::SnapshotStore;
