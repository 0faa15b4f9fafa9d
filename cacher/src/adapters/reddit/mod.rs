//! Reddit adapter
//!
//! Implementation of the feed source for a subreddit listing.

pub mod client;

pub use client::RedditFeedClient;
