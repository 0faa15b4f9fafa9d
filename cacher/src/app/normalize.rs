//! Normalizer
//!
//! Pure numeric helpers that squash raw metrics into comparable ranges.

use super::refresh_config::{VOTES_MAX, VOTES_MIN, VOTES_STEP};

/// Threshold `x` into `[lo, hi]`.
pub fn clamp(lo: f64, hi: f64, x: f64) -> f64 {
    x.min(hi).max(lo)
}

/// Clamp `x` into `[lo, hi]`, then map that range linearly onto `[0, 1]`.
///
/// Requires `hi > lo`.
pub fn normalize(lo: f64, hi: f64, x: f64) -> f64 {
    debug_assert!(hi > lo, "normalize called with hi <= lo");
    (clamp(lo, hi, x) - lo) / (hi - lo)
}

/// Map a vote count to the number of colour-intensity steps it represents,
/// an integer in `[0, VOTES_STEP]`.
pub fn normalize_votes(votes: i64) -> i64 {
    (normalize(VOTES_MIN, VOTES_MAX, votes as f64) * VOTES_STEP).floor() as i64
}

/// Cubic Hermite S-curve from `[0, 1]` onto `[0, 1]`.
pub fn smoothstep(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    (3.0 - 2.0 * x) * x * x
}
