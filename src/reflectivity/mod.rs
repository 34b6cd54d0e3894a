//! reflectivity — forward model from layer parameters to specular reflectivity.
//!
//! Purpose
//! -------
//! Provide the pure functions an objective evaluates for every candidate
//! parameter vector: an error-function density profile built from layer
//! parameters, optional Gaussian roughness smoothing, and the Parratt
//! recursion that turns a sliced profile into `R(Q)`.
//!
//! Key behaviors
//! -------------
//! - `layers`: [`LayerStack`], the validated thickness/density/roughness
//!   triple.
//! - `profile`: [`DensityProfile`] and [`build_density_profile`].
//! - `convolution`: [`convolve_roughness`].
//! - `parratt`: [`solve_reflectivity`] and [`reflectivity_from_profile`].
//! - `objective`: [`ReflectivityObjective`], which composes the above with a
//!   [`Residual`] and implements the optimizer's `Objective` seam.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every function is deterministic and side-effect free; profiles and
//!   curves are immutable once returned.
//! - Invalid inputs are reported as [`ModelError`], never by panicking.
//!
//! Testing notes
//! -------------
//! - Unit tests per submodule check limiting cases with known answers
//!   (sharp steps, σ → 0, uniform half-space, total reflection).

pub mod convolution;
pub mod errors;
pub mod layers;
pub mod objective;
pub mod parratt;
pub mod profile;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::convolution::convolve_roughness;
pub use self::errors::{ModelError, ModelResult};
pub use self::layers::LayerStack;
pub use self::objective::{LayerLayout, ReflectivityData, ReflectivityObjective, Residual};
pub use self::parratt::{
    ReflectivityCurve, ReflectivityOptions, reflectivity_from_profile, solve_reflectivity,
};
pub use self::profile::{DensityProfile, DensityProfilePoint, build_density_profile};
