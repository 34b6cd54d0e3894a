//! Layer stack container for density-profile construction.
//!
//! Purpose
//! -------
//! Hold the thickness, density and roughness parameters of a stratified
//! sample in one validated value, so profile construction can assume a
//! consistent shape.
//!
//! Key behaviors
//! -------------
//! - [`LayerStack::new`] enforces the count relations between the three
//!   parameter sequences and rejects non-finite or negative values.
//! - [`LayerStack::interfaces`] places the interfaces at cumulative depths
//!   `0, t₀, t₀+t₁, ...`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n` layers have `n` thicknesses, `n + 2` densities (ambient medium,
//!   layers, substrate) and `n + 1` roughness values (one per interface).
//! - Thicknesses are finite and `>= 0`; densities and roughness values are
//!   finite. Roughness enters the profile only through `|σ|`.
//!
//! Conventions
//! -----------
//! - Depth increases into the sample; the ambient medium occupies `z < 0`.
//! - Units are the caller's (typically Å for lengths, Å⁻² for density).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the count check, value validation and interface
//!   placement.
use ndarray::Array1;

use crate::reflectivity::errors::{ModelError, ModelResult};

/// `LayerStack` — validated layer parameters of a stratified sample.
///
/// Fields
/// ------
/// - `thickness`: `Array1<f64>`
///   One entry per layer, finite and `>= 0`.
/// - `density`: `Array1<f64>`
///   Ambient medium, each layer, then the substrate (`len = n + 2`).
/// - `roughness`: `Array1<f64>`
///   Interfacial width `σ` of each interface, top to bottom (`len = n + 1`).
///
/// Notes
/// -----
/// - A stack with zero layers is a single interface between ambient medium
///   and substrate.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    thickness: Array1<f64>,
    density: Array1<f64>,
    roughness: Array1<f64>,
}

impl LayerStack {
    /// Construct a validated [`LayerStack`].
    ///
    /// Errors
    /// ------
    /// - `ModelError::LayerCountMismatch`
    ///   If `density.len() != thickness.len() + 2` or
    ///   `roughness.len() != thickness.len() + 1`.
    /// - `ModelError::InvalidThickness`
    ///   If a thickness is non-finite or negative.
    /// - `ModelError::InvalidDensity`
    ///   If a density is non-finite.
    /// - `ModelError::InvalidRoughness`
    ///   If a roughness value is non-finite.
    pub fn new(
        thickness: Array1<f64>, density: Array1<f64>, roughness: Array1<f64>,
    ) -> ModelResult<Self> {
        let layers = thickness.len();
        if density.len() != layers + 2 || roughness.len() != layers + 1 {
            return Err(ModelError::LayerCountMismatch {
                thickness: layers,
                density: density.len(),
                roughness: roughness.len(),
            });
        }
        for (index, &value) in thickness.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::InvalidThickness {
                    index,
                    value,
                    reason: "Thickness must be finite.",
                });
            }
            if value < 0.0 {
                return Err(ModelError::InvalidThickness {
                    index,
                    value,
                    reason: "Thickness must be non-negative.",
                });
            }
        }
        if let Some((index, &value)) = density.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidDensity { index, value });
        }
        if let Some(&value) = roughness.iter().find(|v| !v.is_finite()) {
            return Err(ModelError::InvalidRoughness { value, reason: "Roughness must be finite." });
        }
        Ok(Self { thickness, density, roughness })
    }

    /// Number of layers between ambient medium and substrate.
    pub fn layer_count(&self) -> usize {
        self.thickness.len()
    }

    pub fn thickness(&self) -> &Array1<f64> {
        &self.thickness
    }

    pub fn density(&self) -> &Array1<f64> {
        &self.density
    }

    pub fn roughness(&self) -> &Array1<f64> {
        &self.roughness
    }

    /// Depth of every interface, top to bottom (`len = n + 1`).
    pub fn interfaces(&self) -> Array1<f64> {
        let mut depth = 0.0;
        let mut positions = Vec::with_capacity(self.roughness.len());
        positions.push(depth);
        for &t in &self.thickness {
            depth += t;
            positions.push(depth);
        }
        Array1::from(positions)
    }

    pub fn total_thickness(&self) -> f64 {
        self.thickness.sum()
    }

    /// Largest `|σ|` over all interfaces.
    pub fn max_roughness(&self) -> f64 {
        self.roughness.iter().fold(0.0, |acc: f64, s| acc.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Count relations between thickness, density and roughness.
    // - Rejection of non-finite and negative values.
    // - Interface placement.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Counts that violate `density = n + 2`, `roughness = n + 1` are rejected.
    //
    // Given
    // -----
    // - Two thicknesses with three densities.
    //
    // Expect
    // ------
    // - `LayerCountMismatch { thickness: 2, density: 3, roughness: 3 }`.
    fn new_rejects_count_mismatch() {
        let err = LayerStack::new(array![10.0, 20.0], array![0.0, 1.0, 2.0], array![1.0, 1.0, 1.0])
            .unwrap_err();

        assert_eq!(err, ModelError::LayerCountMismatch { thickness: 2, density: 3, roughness: 3 });
    }

    #[test]
    fn new_rejects_negative_thickness_and_nan_density() {
        let negative =
            LayerStack::new(array![-1.0], array![0.0, 1.0, 2.0], array![0.0, 0.0]).unwrap_err();
        assert!(matches!(negative, ModelError::InvalidThickness { index: 0, .. }));

        let nan =
            LayerStack::new(array![1.0], array![0.0, f64::NAN, 2.0], array![0.0, 0.0]).unwrap_err();
        assert!(matches!(nan, ModelError::InvalidDensity { index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Interfaces sit at cumulative thickness sums starting from zero.
    //
    // Given
    // -----
    // - Thicknesses `[10, 25]`, roughness `[1, -3, 2]`.
    //
    // Expect
    // ------
    // - Interfaces `[0, 10, 35]`, total 35, max roughness 3.
    fn interfaces_are_cumulative_depths() {
        let stack = LayerStack::new(
            array![10.0, 25.0],
            array![0.0, 1.0, 2.0, 3.0],
            array![1.0, -3.0, 2.0],
        )
        .unwrap();

        assert_eq!(stack.interfaces(), array![0.0, 10.0, 35.0]);
        assert_eq!(stack.total_thickness(), 35.0);
        assert_eq!(stack.max_roughness(), 3.0);
        assert_eq!(stack.layer_count(), 2);
    }
}
