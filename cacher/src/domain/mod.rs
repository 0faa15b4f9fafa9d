//! Domain layer
//!
//! Contains pure data types with no external dependencies.
//! - `entities`: Feed items and the scoreboard derived from them
//! - `ports`: Trait definitions for the feed source, renderer and store

pub mod entities;
pub mod ports;
