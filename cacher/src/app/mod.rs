//! Application layer
//!
//! The adaptive refresh core and the loop that drives it.
//! Services coordinate between domain entities, ports, and external systems.

pub mod diff_engine;
pub mod normalize;
pub mod poll_loop_service;
pub mod refresh_config;
pub mod refresh_controller;

#[allow(unused_imports)]
pub use diff_engine::{compute_delta, DeltaReport, DiffEngine, NewItemPenalty};
pub use poll_loop_service::{CycleReport, PollLoopService};
// Re-export tuning constants (checked at startup)
#[allow(unused_imports)]
pub use refresh_config::*;
#[allow(unused_imports)]
pub use refresh_controller::{next_refresh, RefreshController};
