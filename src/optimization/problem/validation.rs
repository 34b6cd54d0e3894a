//! Validation helpers for problem and strategy configuration.
//!
//! - [`verify_delta`]: step sizes must be finite and strictly positive.
//! - [`verify_delta_range`]: `min_delta <= max_delta`, both valid steps.
//! - [`verify_stage_count`]: at least one stage.
//! - [`verify_dimension`]: two lengths that must agree.
use crate::optimization::errors::{OptError, OptResult};

/// Validate a step size.
///
/// # Errors
/// Returns [`OptError::InvalidDelta`] if the value is non-finite or ≤ 0.0.
pub fn verify_delta(delta: f64) -> OptResult<()> {
    if !delta.is_finite() {
        return Err(OptError::InvalidDelta { delta, reason: "Step size must be finite." });
    }
    if delta <= 0.0 {
        return Err(OptError::InvalidDelta { delta, reason: "Step size must be positive." });
    }
    Ok(())
}

/// Validate a `(min_delta, max_delta)` pair.
///
/// # Errors
/// - [`OptError::InvalidDelta`] if either step is invalid or
///   `max_delta < min_delta` (reported on `max_delta`).
pub fn verify_delta_range(min_delta: f64, max_delta: f64) -> OptResult<()> {
    verify_delta(min_delta)?;
    verify_delta(max_delta)?;
    if max_delta < min_delta {
        return Err(OptError::InvalidDelta {
            delta: max_delta,
            reason: "Maximum step size must not be below the minimum step size.",
        });
    }
    Ok(())
}

/// Validate a stage count.
///
/// # Errors
/// Returns [`OptError::InvalidStageCount`] if `stages == 0`.
pub fn verify_stage_count(stages: usize) -> OptResult<()> {
    if stages == 0 {
        return Err(OptError::InvalidStageCount {
            stages,
            reason: "At least one stage is required.",
        });
    }
    Ok(())
}

/// Validate that `found` matches `expected` for the vector called `what`.
///
/// # Errors
/// Returns [`OptError::DimensionMismatch`] on disagreement.
pub fn verify_dimension(what: &'static str, expected: usize, found: usize) -> OptResult<()> {
    if expected != found {
        return Err(OptError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Non-finite, zero and negative steps are all rejected; positive ones pass.
    //
    // Given
    // -----
    // - Steps `NaN`, `+∞`, `0`, `-1`, `0.1`.
    //
    // Expect
    // ------
    // - Only `0.1` is accepted.
    fn verify_delta_accepts_only_positive_finite() {
        for bad in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            assert!(matches!(verify_delta(bad), Err(OptError::InvalidDelta { .. })));
        }
        assert!(verify_delta(0.1).is_ok());
    }

    #[test]
    fn verify_delta_range_rejects_inverted_range() {
        assert!(verify_delta_range(0.1, 1.0).is_ok());
        assert!(verify_delta_range(0.5, 0.5).is_ok());
        match verify_delta_range(1.0, 0.1).unwrap_err() {
            OptError::InvalidDelta { delta, .. } => assert_eq!(delta, 0.1),
            other => panic!("expected InvalidDelta, got {other:?}"),
        }
    }

    #[test]
    fn verify_stage_count_rejects_zero() {
        assert!(verify_stage_count(0).is_err());
        assert!(verify_stage_count(3).is_ok());
    }
}
