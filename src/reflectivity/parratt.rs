//! Specular reflectivity of a sliced profile via the Parratt recursion.
//!
//! Purpose
//! -------
//! Compute `R(Q)` for a stack of equally thick slabs, one per density
//! sample, from the top medium down to the substrate.
//!
//! Key behaviors
//! -------------
//! - Wavevector in slab `j`: `kⱼ = √((Q/2)² - 4π (ρⱼ - ρ₀))`, complex.
//! - Fresnel coefficient at interface `j`: `fⱼ = (kⱼ - kⱼ₊₁) / (kⱼ + kⱼ₊₁)`,
//!   taken as `0` when both wavevectors vanish.
//! - Phase across slab `j + 1`: `pⱼ = exp(2i kⱼ₊₁ d)`.
//! - Recursion from the bottom: `r_last = 0`,
//!   `rⱼ = (fⱼ + rⱼ₊₁ pⱼ) / (1 + fⱼ rⱼ₊₁ pⱼ)`; `R = |r₀|² · scale + background`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A single sample has no interface and reflects nothing (`R = background`).
//! - Slab thickness is uniform; [`reflectivity_from_profile`] takes it from
//!   the profile's sampling step.
//!
//! Conventions
//! -----------
//! - `Q` and `ρ` in reciprocal units of the thickness (Å⁻¹, Å⁻², Å).
use std::f64::consts::PI;

use nalgebra::Complex;
use ndarray::Array1;

use crate::reflectivity::{
    errors::{ModelError, ModelResult},
    profile::DensityProfile,
};

/// Scale and background applied to `|r₀|²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectivityOptions {
    pub scale: f64,
    pub background: f64,
}

impl ReflectivityOptions {
    /// # Errors
    /// - `ModelError::InvalidScale` unless `scale` is finite and `> 0`.
    /// - `ModelError::InvalidBackground` unless `background` is finite and
    ///   `>= 0`.
    pub fn new(scale: f64, background: f64) -> ModelResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ModelError::InvalidScale { value: scale });
        }
        if !background.is_finite() || background < 0.0 {
            return Err(ModelError::InvalidBackground { value: background });
        }
        Ok(Self { scale, background })
    }
}

impl Default for ReflectivityOptions {
    fn default() -> Self {
        Self { scale: 1.0, background: 0.0 }
    }
}

/// Reflectivity sampled at a set of momentum-transfer values.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectivityCurve {
    q: Array1<f64>,
    intensity: Array1<f64>,
}

impl ReflectivityCurve {
    pub fn q(&self) -> &Array1<f64> {
        &self.q
    }

    pub fn intensity(&self) -> &Array1<f64> {
        &self.intensity
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// `(Q, R)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.q.iter().copied().zip(self.intensity.iter().copied())
    }
}

/// Reflectivity of slabs of thickness `thickness` with densities `sld`.
///
/// `sld[0]` is the incident medium and `sld[last]` the substrate; both are
/// semi-infinite, so their thickness never enters.
///
/// Errors
/// ------
/// - `ModelError::EmptyProfile` if `sld` is empty.
/// - `ModelError::InvalidThickness` unless `thickness` is finite and `>= 0`.
/// - `ModelError::InvalidSld` / `ModelError::InvalidMomentumTransfer` for
///   non-finite inputs.
pub fn solve_reflectivity(
    q: &Array1<f64>, thickness: f64, sld: &Array1<f64>, options: &ReflectivityOptions,
) -> ModelResult<ReflectivityCurve> {
    if sld.is_empty() {
        return Err(ModelError::EmptyProfile);
    }
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(ModelError::InvalidThickness {
            index: 0,
            value: thickness,
            reason: "Slab thickness must be finite and non-negative.",
        });
    }
    if let Some((index, &value)) = sld.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::InvalidSld { index, value });
    }
    if let Some((index, &value)) = q.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::InvalidMomentumTransfer { index, value });
    }

    let contrast: Vec<f64> = sld.iter().map(|rho| 4.0 * PI * (rho - sld[0])).collect();
    let mut k = vec![Complex::new(0.0, 0.0); contrast.len()];
    let intensity = q.mapv(|qz| {
        let r0 = top_amplitude(qz, thickness, &contrast, &mut k);
        r0.norm_sqr() * options.scale + options.background
    });
    Ok(ReflectivityCurve { q: q.clone(), intensity })
}

/// Reflectivity of a uniformly sampled density profile.
///
/// Each sample becomes one slab of thickness equal to the sampling step.
///
/// Errors
/// ------
/// - `ModelError::InvalidProfile` if the profile is not uniformly sampled.
/// - Errors of [`solve_reflectivity`].
pub fn reflectivity_from_profile(
    q: &Array1<f64>, profile: &DensityProfile, options: &ReflectivityOptions,
) -> ModelResult<ReflectivityCurve> {
    let step = profile.uniform_step()?;
    solve_reflectivity(q, step, profile.density(), options)
}

/// `r₀` at one `Q`; `k` is scratch space of the same length as `contrast`.
fn top_amplitude(qz: f64, thickness: f64, contrast: &[f64], k: &mut [Complex<f64>]) -> Complex<f64> {
    let half_q_sq = 0.25 * qz * qz;
    for (kj, &c) in k.iter_mut().zip(contrast) {
        *kj = Complex::new(half_q_sq - c, 0.0).sqrt();
    }
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    let mut r = zero;
    for j in (0..k.len().saturating_sub(1)).rev() {
        let sum = k[j] + k[j + 1];
        let fresnel = if sum == zero { zero } else { (k[j] - k[j + 1]) / sum };
        let phase = (Complex::new(0.0, 2.0 * thickness) * k[j + 1]).exp();
        let rp = r * phase;
        r = (fresnel + rp) / (one + fresnel * rp);
    }
    r
}
