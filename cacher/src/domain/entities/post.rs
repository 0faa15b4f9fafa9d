//! Post domain entity
//!
//! One item of the ranked feed. Only `id` and `ups` matter to the refresh
//! logic; the remaining fields are carried through untouched for rendering.

use serde::{Deserialize, Serialize};

/// A single feed item as delivered by the feed source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Popularity metric; the feed is ranked by this, highest first
    pub ups: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub permalink: String,
}

impl Post {
    pub fn new(id: impl Into<String>, ups: i64) -> Self {
        Self {
            id: id.into(),
            ups,
            created_utc: 0.0,
            domain: String::new(),
            url: String::new(),
            title: String::new(),
            permalink: String::new(),
        }
    }
}

/// Sort posts into rank order (descending score). Ties keep source order.
pub fn rank_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.ups.cmp(&a.ups));
}
