//! Refresh tuning constants
//!
//! One versioned block for every number the change detector and the refresh
//! controller depend on. The vote and delta constants are calibrated against
//! the front-end's colour-intensity scale and must move in lockstep with it;
//! bump `TUNING_VERSION` whenever any of them changes.

use crate::error::DomainError;

/// Version of this tuning block
pub const TUNING_VERSION: u32 = 1;

/// Shortest wait between refreshes, in seconds
pub const REFRESH_MIN: f64 = 30.0;

/// Longest wait between refreshes, in seconds
pub const REFRESH_MAX: f64 = 3600.0;

/// Base of the exponential streak -> interval map
pub const REFRESH_BASE: f64 = 2.0;

/// Streak decrement after a significant change
pub const REFRESH_UP: f64 = 1.5;

/// Streak increment after a negligible change
pub const REFRESH_DOWN: f64 = 1.0;

/// Votes at or below this count as zero colour intensity
pub const VOTES_MIN: f64 = 20.0;

/// Votes at or above this count as full colour intensity
pub const VOTES_MAX: f64 = 700.0;

/// Number of perceptible colour steps between `VOTES_MIN` and `VOTES_MAX`
pub const VOTES_STEP: f64 = 150.0;

/// Raw delta at or below this is "no change"
pub const DELTA_MIN: f64 = 2.0;

/// Raw delta at or above this is "everything changed"
pub const DELTA_MAX: f64 = 100.0;

/// Smoothed delta above this is a significant change
pub const DELTA_CUTOFF: f64 = 0.5;

/// Largest streak value: the exponent at which the interval reaches `REFRESH_MAX`
pub fn streak_max() -> f64 {
    (REFRESH_MAX - REFRESH_MIN + 1.0).log(REFRESH_BASE).ceil()
}

/// Check the tuning block for values the maths cannot work with.
///
/// Run once at startup; a failure means a broken build, not a bad cycle.
pub fn validate_tuning() -> Result<(), DomainError> {
    check_range("VOTES", VOTES_MIN, VOTES_MAX)?;
    check_range("DELTA", DELTA_MIN, DELTA_MAX)?;
    check_range("REFRESH", REFRESH_MIN, REFRESH_MAX)?;

    if REFRESH_BASE <= 1.0 {
        return Err(DomainError::InvariantViolation(format!(
            "REFRESH_BASE must be greater than 1, got {}",
            REFRESH_BASE
        )));
    }
    if REFRESH_UP <= 0.0 || REFRESH_DOWN <= 0.0 || VOTES_STEP <= 0.0 {
        return Err(DomainError::InvariantViolation(
            "REFRESH_UP, REFRESH_DOWN and VOTES_STEP must be positive".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&DELTA_CUTOFF) {
        return Err(DomainError::InvariantViolation(format!(
            "DELTA_CUTOFF must lie in [0, 1), got {}",
            DELTA_CUTOFF
        )));
    }

    Ok(())
}

/// `normalize(lo, hi, _)` divides by `hi - lo`.
pub fn check_range(name: &str, lo: f64, hi: f64) -> Result<(), DomainError> {
    if hi > lo {
        Ok(())
    } else {
        Err(DomainError::InvariantViolation(format!(
            "{name}_MAX ({hi}) must be greater than {name}_MIN ({lo})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_tuning_is_valid() {
        assert!(validate_tuning().is_ok());
    }

    #[test]
    fn streak_max_reaches_refresh_max() {
        // ceil(log2(3571))
        assert_eq!(streak_max(), 12.0);
        assert!(REFRESH_MIN + REFRESH_BASE.powf(streak_max()) - 1.0 >= REFRESH_MAX);
    }

    #[test]
    fn check_range_rejects_empty_and_inverted_ranges() {
        assert!(check_range("VOTES", 20.0, 700.0).is_ok());
        assert!(matches!(
            check_range("VOTES", 5.0, 5.0),
            Err(DomainError::InvariantViolation(_))
        ));
        let err = check_range("DELTA", 100.0, 2.0).unwrap_err();
        assert!(err.to_string().contains("DELTA_MAX"));
    }

    #[test]
    fn refresh_reacts_faster_than_it_relaxes() {
        assert!(REFRESH_UP > REFRESH_DOWN);
    }
}
