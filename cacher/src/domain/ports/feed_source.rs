//! Feed source port trait
//!
//! Defines the interface for fetching the current ranked feed.

use async_trait::async_trait;

use crate::domain::entities::Post;
use crate::error::FeedError;

/// Port trait for the upstream feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current feed in source order; the poll loop ranks it.
    async fn fetch(&self) -> Result<Vec<Post>, FeedError>;
}
