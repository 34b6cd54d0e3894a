//! problem::bounds — per-dimension box constraints.
//!
//! Purpose
//! -------
//! Hold the `minima`/`maxima` pair that every strategy respects and provide
//! the single clamping rule used before any candidate is evaluated or
//! written back.
//!
//! Invariants & assumptions
//! ------------------------
//! - `minima.len() == maxima.len()`.
//! - `minima[i] <= maxima[i]` and neither is NaN. Infinite values are
//!   allowed and leave that side unbounded.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the constructor's length and ordering checks and the
//!   clamping of candidates that overshoot either side.
use crate::optimization::{
    errors::{OptError, OptResult},
    problem::types::Theta,
};

/// Box constraints `[minima[i], maxima[i]]` for each parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    minima: Theta,
    maxima: Theta,
}

impl Bounds {
    /// Construct validated bounds.
    ///
    /// # Errors
    /// - [`OptError::EmptyParameterVector`] if both vectors are empty.
    /// - [`OptError::DimensionMismatch`] if the lengths differ.
    /// - [`OptError::InvalidBounds`] for a NaN entry or `min > max`.
    pub fn new(minima: Theta, maxima: Theta) -> OptResult<Self> {
        if minima.len() != maxima.len() {
            return Err(OptError::DimensionMismatch {
                what: "maxima",
                expected: minima.len(),
                found: maxima.len(),
            });
        }
        if minima.is_empty() {
            return Err(OptError::EmptyParameterVector);
        }
        for (index, (&min, &max)) in minima.iter().zip(maxima.iter()).enumerate() {
            if min.is_nan() || max.is_nan() {
                return Err(OptError::InvalidBounds {
                    index,
                    min,
                    max,
                    reason: "Bounds must not be NaN.",
                });
            }
            if min > max {
                return Err(OptError::InvalidBounds {
                    index,
                    min,
                    max,
                    reason: "Lower bound must not exceed upper bound.",
                });
            }
        }
        Ok(Self { minima, maxima })
    }

    /// Unbounded box of dimension `n`.
    pub fn unbounded(n: usize) -> OptResult<Self> {
        Self::new(Theta::from_elem(n, f64::NEG_INFINITY), Theta::from_elem(n, f64::INFINITY))
    }

    pub fn len(&self) -> usize {
        self.minima.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minima.is_empty()
    }

    pub fn minima(&self) -> &Theta {
        &self.minima
    }

    pub fn maxima(&self) -> &Theta {
        &self.maxima
    }

    /// Clamp `value` into `[minima[index], maxima[index]]`.
    ///
    /// A NaN `value` is mapped to the lower bound so that nothing outside the
    /// box ever reaches the parameter vector.
    pub fn clamp(&self, index: usize, value: f64) -> f64 {
        let (min, max) = (self.minima[index], self.maxima[index]);
        if value.is_nan() { min } else { value.clamp(min, max) }
    }

    /// Clamp every coordinate of `theta` in place. Returns `true` if any
    /// coordinate moved.
    pub fn clamp_all(&self, theta: &mut Theta) -> bool {
        let mut moved = false;
        for (index, value) in theta.iter_mut().enumerate() {
            let clamped = self.clamp(index, *value);
            if clamped != *value || value.is_nan() {
                moved = true;
            }
            *value = clamped;
        }
        moved
    }

    /// `true` when every coordinate lies inside its bounds.
    pub fn contains(&self, theta: &Theta) -> bool {
        theta.len() == self.len()
            && theta
                .iter()
                .zip(self.minima.iter().zip(self.maxima.iter()))
                .all(|(&v, (&min, &max))| v >= min && v <= max)
    }
}
