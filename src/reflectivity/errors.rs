//! reflectivity::errors — error types for the forward physical model.
//!
//! Purpose
//! -------
//! Report malformed layer stacks, sampling grids, and measurement data
//! before any profile or reflectivity is computed. Every constructor in
//! [`crate::reflectivity`] returns [`ModelResult<T>`] instead of panicking.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the physical constraint that failed
//!   ("thickness must be non-negative"), not in terms of indices alone.
//! - Inside an objective these errors travel up as
//!   [`crate::optimization::errors::OptError::Model`].

pub type ModelResult<T> = Result<T, ModelError>;

/// ModelError — failures of the density-profile and reflectivity pipeline.
///
/// Variants
/// --------
/// - `LayerCountMismatch` — the thickness, density and roughness counts do
///   not satisfy `density = thickness + 2`, `roughness = thickness + 1`.
/// - `InvalidThickness`, `InvalidDensity`, `InvalidRoughness`, `InvalidStep`
///   — a layer or sampling value is non-finite or out of range.
/// - `InvalidProfile`, `EmptyProfile` — a depth axis is not strictly
///   increasing, uniform where required, or has no samples.
/// - `InvalidMomentumTransfer`, `InvalidSld`, `InvalidScale`,
///   `InvalidBackground` — reflectivity solver inputs.
/// - `DataLengthMismatch`, `InvalidObservation`, `ParameterCountMismatch`,
///   `MissingUncertainty` — measured data and parameter layout used by the
///   reflectivity objective.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Layer stack ----
    LayerCountMismatch {
        thickness: usize,
        density: usize,
        roughness: usize,
    },
    InvalidThickness {
        index: usize,
        value: f64,
        reason: &'static str,
    },
    InvalidDensity {
        index: usize,
        value: f64,
    },
    InvalidRoughness {
        value: f64,
        reason: &'static str,
    },
    InvalidStep {
        value: f64,
        reason: &'static str,
    },

    // ---- Profiles ----
    InvalidProfile {
        reason: &'static str,
    },
    EmptyProfile,

    // ---- Reflectivity ----
    InvalidMomentumTransfer {
        index: usize,
        value: f64,
    },
    InvalidSld {
        index: usize,
        value: f64,
    },
    InvalidScale {
        value: f64,
    },
    InvalidBackground {
        value: f64,
    },

    // ---- Measured data / parameter layout ----
    DataLengthMismatch {
        expected: usize,
        found: usize,
    },
    InvalidObservation {
        index: usize,
        value: f64,
        reason: &'static str,
    },
    ParameterCountMismatch {
        expected: usize,
        found: usize,
    },
    MissingUncertainty,
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Layer stack ----
            ModelError::LayerCountMismatch { thickness, density, roughness } => write!(
                f,
                "Layer count mismatch: {thickness} thicknesses need {} densities and {} roughness values, found {density} and {roughness}",
                thickness + 2,
                thickness + 1
            ),
            ModelError::InvalidThickness { index, value, reason } => {
                write!(f, "Invalid thickness at layer {index}: {value}: {reason}")
            }
            ModelError::InvalidDensity { index, value } => {
                write!(f, "Invalid density at index {index}: {value}, must be finite")
            }
            ModelError::InvalidRoughness { value, reason } => {
                write!(f, "Invalid roughness {value}: {reason}")
            }
            ModelError::InvalidStep { value, reason } => {
                write!(f, "Invalid sampling step {value}: {reason}")
            }

            // ---- Profiles ----
            ModelError::InvalidProfile { reason } => write!(f, "Invalid density profile: {reason}"),
            ModelError::EmptyProfile => write!(f, "Density profile has no samples"),

            // ---- Reflectivity ----
            ModelError::InvalidMomentumTransfer { index, value } => {
                write!(f, "Invalid momentum transfer at index {index}: {value}, must be finite")
            }
            ModelError::InvalidSld { index, value } => {
                write!(f, "Invalid scattering-length density at index {index}: {value}, must be finite")
            }
            ModelError::InvalidScale { value } => {
                write!(f, "Invalid reflectivity scale {value}, must be finite and > 0")
            }
            ModelError::InvalidBackground { value } => {
                write!(f, "Invalid reflectivity background {value}, must be finite and >= 0")
            }

            // ---- Measured data / parameter layout ----
            ModelError::DataLengthMismatch { expected, found } => {
                write!(f, "Data length mismatch: expected {expected}, found {found}")
            }
            ModelError::InvalidObservation { index, value, reason } => {
                write!(f, "Invalid observation at index {index}: {value}: {reason}")
            }
            ModelError::ParameterCountMismatch { expected, found } => {
                write!(f, "Parameter count mismatch: expected {expected}, found {found}")
            }
            ModelError::MissingUncertainty => {
                write!(f, "Chi-squared residual requires measurement uncertainties")
            }
        }
    }
}
