//! Domain entities
//!
//! Pure domain models for the feed snapshot.

pub mod post;
pub mod scoreboard;

pub use post::{rank_posts, Post};
pub use scoreboard::Scoreboard;
