//! Test fixtures
//!
//! Factory functions for creating feed data with sensible defaults.

use crate::domain::entities::{Post, Scoreboard};

/// Create a post with realistic payload fields
pub fn test_post(id: &str, ups: i64) -> Post {
    Post {
        id: id.to_string(),
        ups,
        created_utc: 1_700_000_000.0,
        domain: "example.com".to_string(),
        url: format!("https://example.com/{}", id),
        title: format!("Story {}", id),
        permalink: format!("/r/politics/comments/{}/story/", id),
    }
}

/// Create posts from `(id, ups)` pairs, in the given order
pub fn test_posts(entries: &[(&str, i64)]) -> Vec<Post> {
    entries.iter().map(|(id, ups)| test_post(id, *ups)).collect()
}

/// Create a scoreboard from `(id, votes)` pairs, in the given order
pub fn scoreboard(entries: &[(&str, i64)]) -> Scoreboard {
    Scoreboard::try_new(
        entries.iter().map(|(id, _)| id.to_string()).collect(),
        entries.iter().map(|(_, votes)| *votes).collect(),
    )
    .unwrap()
}
