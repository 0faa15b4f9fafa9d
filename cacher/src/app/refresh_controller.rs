//! Refresh controller
//!
//! A streak counter that walks between "refresh often" (0) and "refresh
//! rarely" (`streak_max()`), and the exponential map from streak to the wait
//! before the next poll. Significant changes pull the streak down faster than
//! quiet cycles push it up.

use std::time::Duration;

use super::normalize::clamp;
use super::refresh_config::{
    streak_max, REFRESH_BASE, REFRESH_DOWN, REFRESH_MAX, REFRESH_MIN, REFRESH_UP,
};

/// Streak at boot. Any first transition lands on 0, so the process never
/// starts out on a long interval.
pub const INITIAL_STREAK: f64 = -1.0;

/// Wait in seconds for a given streak.
pub fn next_refresh(streak: f64) -> f64 {
    let refresh = REFRESH_MIN + REFRESH_BASE.powf(streak.abs()) - 1.0;
    clamp(REFRESH_MIN, REFRESH_MAX, refresh)
}

/// Streak state owned by the poll loop
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshController {
    streak: f64,
    next_refresh: f64,
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshController {
    /// Boot state: streak -1, first wait `REFRESH_MIN`.
    pub fn new() -> Self {
        Self {
            streak: INITIAL_STREAK,
            next_refresh: REFRESH_MIN,
        }
    }

    /// Controller pinned at a given streak (clamped).
    pub fn with_streak(streak: f64) -> Self {
        let streak = clamp(0.0, streak_max(), streak);
        Self {
            streak,
            next_refresh: next_refresh(streak),
        }
    }

    pub fn streak(&self) -> f64 {
        self.streak
    }

    pub fn next_refresh_secs(&self) -> f64 {
        self.next_refresh
    }

    pub fn next_refresh(&self) -> Duration {
        Duration::from_secs_f64(self.next_refresh)
    }

    /// Apply one transition and return the new wait in seconds.
    pub fn record(&mut self, significant: bool) -> f64 {
        if significant {
            self.streak -= REFRESH_UP;
        } else {
            self.streak += REFRESH_DOWN;
        }
        self.streak = clamp(0.0, streak_max(), self.streak);
        self.next_refresh = next_refresh(self.streak);
        self.next_refresh
    }
}
