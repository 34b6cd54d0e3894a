//! Roughness smoothing of a sampled profile by local Gaussian convolution.
//!
//! Each sample is replaced by the Gaussian-weighted mean of the samples
//! within `2σ` of it, weights `exp(-(z - z₀)² / (2σ²))` normalized to one.
//! `σ = 0` is the identity. A sample whose weight sum is not a positive
//! finite number keeps its unconvolved value.
use ndarray::Array1;

use crate::reflectivity::{
    errors::{ModelError, ModelResult},
    profile::DensityProfile,
};

/// Smooth `profile` with a Gaussian of width `roughness`.
///
/// The depth axis is unchanged; only densities are replaced.
///
/// Errors
/// ------
/// - `ModelError::InvalidRoughness` if `roughness` is negative or
///   non-finite.
pub fn convolve_roughness(profile: &DensityProfile, roughness: f64) -> ModelResult<DensityProfile> {
    if !roughness.is_finite() {
        return Err(ModelError::InvalidRoughness {
            value: roughness,
            reason: "Roughness must be finite.",
        });
    }
    if roughness < 0.0 {
        return Err(ModelError::InvalidRoughness {
            value: roughness,
            reason: "Roughness must be non-negative.",
        });
    }
    if roughness == 0.0 {
        return Ok(profile.clone());
    }

    let depth = profile.depth();
    let density = profile.density();
    let reach = 2.0 * roughness;
    let two_var = 2.0 * roughness * roughness;
    let n = profile.len();

    // Depth is sorted, so the window of sample i is a contiguous range that
    // only moves forward.
    let mut lo = 0;
    let mut hi = 0;
    let smoothed = Array1::from_shape_fn(n, |i| {
        let z0 = depth[i];
        while depth[lo] < z0 - reach {
            lo += 1;
        }
        while hi + 1 < n && depth[hi + 1] <= z0 + reach {
            hi += 1;
        }
        let mut weight_sum = 0.0;
        let mut acc = 0.0;
        for j in lo..=hi {
            let dz = depth[j] - z0;
            let w = (-dz * dz / two_var).exp();
            weight_sum += w;
            acc += w * density[j];
        }
        if weight_sum > 0.0 && weight_sum.is_finite() { acc / weight_sum } else { density[i] }
    });
    Ok(DensityProfile::from_validated(depth.clone(), smoothed))
}
