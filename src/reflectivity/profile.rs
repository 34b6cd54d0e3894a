//! Density profiles and their construction from a layer stack.
//!
//! Purpose
//! -------
//! Turn a [`LayerStack`] into a sampled depth profile in which each
//! interface is blended by an error function of width `σ`.
//!
//! Key behaviors
//! -------------
//! - [`DensityProfile`] stores depth and density as two `Array1<f64>`
//!   columns with a strictly increasing depth axis.
//! - [`build_density_profile`] samples
//!   `y(z) = ρ₀ + Σₖ (ρₖ₊₁ - ρₖ) · ½ (1 + erf((z - zₖ) / (√2 |σₖ|)))`
//!   on a uniform grid covering every interface plus a margin.
//!
//! Invariants & assumptions
//! ------------------------
//! - Profiles are never mutated after construction; objectives rebuild them
//!   per evaluation.
//! - A zero roughness is a sharp step that takes the value ½ exactly at the
//!   interface.
//!
//! Conventions
//! -----------
//! - The grid runs from `-margin` to `total + margin` with
//!   `margin = max(4 · max|σ|, step)`, so both bulk media are represented by
//!   at least one sample.
use ndarray::Array1;
use statrs::function::erf::erf;

use crate::reflectivity::{
    errors::{ModelError, ModelResult},
    layers::LayerStack,
};

/// Relative tolerance when checking that a depth axis is uniform.
const UNIFORM_STEP_RTOL: f64 = 1e-9;

/// One sample of a density profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityProfilePoint {
    pub depth: f64,
    pub density: f64,
}

/// `DensityProfile` — density sampled along a strictly increasing depth axis.
///
/// Invariants
/// ----------
/// - `depth.len() == density.len() > 0`.
/// - All values finite; `depth` strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    depth: Array1<f64>,
    density: Array1<f64>,
}

impl DensityProfile {
    /// Construct a validated profile from its two columns.
    ///
    /// Errors
    /// ------
    /// - `ModelError::DataLengthMismatch` if the columns differ in length.
    /// - `ModelError::EmptyProfile` if there are no samples.
    /// - `ModelError::InvalidProfile` for non-finite values or a depth axis
    ///   that is not strictly increasing.
    pub fn new(depth: Array1<f64>, density: Array1<f64>) -> ModelResult<Self> {
        if depth.len() != density.len() {
            return Err(ModelError::DataLengthMismatch {
                expected: depth.len(),
                found: density.len(),
            });
        }
        if depth.is_empty() {
            return Err(ModelError::EmptyProfile);
        }
        if depth.iter().chain(density.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidProfile { reason: "Samples must be finite." });
        }
        if depth.windows(2).into_iter().any(|w| w[1] <= w[0]) {
            return Err(ModelError::InvalidProfile {
                reason: "Depth must be strictly increasing.",
            });
        }
        Ok(Self { depth, density })
    }

    pub(crate) fn from_validated(depth: Array1<f64>, density: Array1<f64>) -> Self {
        Self { depth, density }
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn depth(&self) -> &Array1<f64> {
        &self.depth
    }

    pub fn density(&self) -> &Array1<f64> {
        &self.density
    }

    pub fn points(&self) -> impl Iterator<Item = DensityProfilePoint> + '_ {
        self.depth
            .iter()
            .zip(self.density.iter())
            .map(|(&depth, &density)| DensityProfilePoint { depth, density })
    }

    /// Spacing of a uniformly sampled profile.
    ///
    /// A single-sample profile has no spacing and reports `0`.
    ///
    /// Errors
    /// ------
    /// - `ModelError::InvalidProfile` if the spacing varies by more than a
    ///   relative `1e-9`.
    pub fn uniform_step(&self) -> ModelResult<f64> {
        if self.len() < 2 {
            return Ok(0.0);
        }
        let step = self.depth[1] - self.depth[0];
        let uniform = self
            .depth
            .windows(2)
            .into_iter()
            .all(|w| ((w[1] - w[0]) - step).abs() <= UNIFORM_STEP_RTOL * step.abs().max(1.0));
        if !uniform {
            return Err(ModelError::InvalidProfile { reason: "Depth sampling must be uniform." });
        }
        Ok(step)
    }
}

/// Sample the error-function density profile of `stack` every `step`.
///
/// Errors
/// ------
/// - `ModelError::InvalidStep` unless `step` is finite and `> 0`.
pub fn build_density_profile(stack: &LayerStack, step: f64) -> ModelResult<DensityProfile> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ModelError::InvalidStep {
            value: step,
            reason: "Sampling step must be finite and > 0.",
        });
    }
    let margin = (4.0 * stack.max_roughness()).max(step);
    let start = -margin;
    let span = stack.total_thickness() + 2.0 * margin;
    let samples = (span / step).floor() as usize + 1;

    let interfaces = stack.interfaces();
    let density = stack.density();
    let roughness = stack.roughness();

    let depth = Array1::from_shape_fn(samples, |i| start + i as f64 * step);
    let values = depth.mapv(|z| {
        let mut y = density[0];
        for (k, (&z_k, &sigma)) in interfaces.iter().zip(roughness.iter()).enumerate() {
            y += (density[k + 1] - density[k]) * step_fraction(z - z_k, sigma.abs());
        }
        y
    });
    Ok(DensityProfile::from_validated(depth, values))
}

/// Fraction of an interface's contrast reached at offset `dz` from it.
fn step_fraction(dz: f64, sigma: f64) -> f64 {
    if sigma == 0.0 {
        return match dz.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Less) => 0.0,
            Some(std::cmp::Ordering::Greater) => 1.0,
            _ => 0.5,
        };
    }
    0.5 * (1.0 + erf(dz / (std::f64::consts::SQRT_2 * sigma)))
}
