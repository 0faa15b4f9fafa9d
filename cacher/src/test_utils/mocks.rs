//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record what they were asked to do so tests can verify behavior.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::Post;
use crate::domain::ports::{FeedSource, PageRenderer, SnapshotStore};
use crate::error::{FeedError, RenderError, StoreError};

// ============================================================================
// In-Memory Feed Source
// ============================================================================

/// Replays a scripted sequence of fetch results, one per call.
///
/// Once the script runs out every fetch fails with a 503.
#[derive(Default)]
pub struct InMemoryFeedSource {
    responses: Arc<RwLock<VecDeque<Result<Vec<Post>, FeedError>>>>,
    fetches: AtomicUsize,
}

impl InMemoryFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful fetch
    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.responses.write().unwrap().push_back(Ok(posts));
        self
    }

    /// Queue a failed fetch
    pub fn with_failure(self, error: FeedError) -> Self {
        self.responses.write().unwrap().push_back(Err(error));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for InMemoryFeedSource {
    async fn fetch(&self) -> Result<Vec<Post>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FeedError::Api {
                    status: 503,
                    message: "no scripted response left".to_string(),
                })
            })
    }
}

// ============================================================================
// Stalled Feed Source
// ============================================================================

/// A feed whose requests never complete, like an upstream that accepted the
/// connection and went silent
#[derive(Default)]
pub struct StalledFeedSource {
    fetches: AtomicUsize,
}

impl StalledFeedSource {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StalledFeedSource {
    async fn fetch(&self) -> Result<Vec<Post>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

// ============================================================================
// Recording Snapshot Store
// ============================================================================

/// Keeps every committed payload in memory
#[derive(Default)]
pub struct RecordingSnapshotStore {
    commits: Arc<RwLock<Vec<Vec<u8>>>>,
    fail: bool,
}

impl RecordingSnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commits.read().unwrap().len()
    }

    pub fn last_commit(&self) -> Option<Vec<u8>> {
        self.commits.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl SnapshotStore for RecordingSnapshotStore {
    async fn commit(&self, payload: &[u8]) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Api {
                status: 500,
                message: "mock store rejects writes".to_string(),
            });
        }
        self.commits.write().unwrap().push(payload.to_vec());
        Ok(())
    }
}

// ============================================================================
// JSON Renderer
// ============================================================================

/// Renders the post list as plain JSON
pub struct JsonRenderer;

impl PageRenderer for JsonRenderer {
    fn render(&self, posts: &[Post]) -> Result<Vec<u8>, RenderError> {
        Ok(serde_json::to_vec(posts)?)
    }
}
