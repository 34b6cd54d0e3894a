//! problem::types — shared numeric aliases.
//!
//! Every vector in the optimization layer is an `ndarray::Array1<f64>`; the
//! aliases below keep the rest of the code agnostic to that choice.
use ndarray::Array1;

/// Parameter vector `θ`, one slot per fit parameter.
pub type Theta = Array1<f64>;

/// Scalar cost returned by an objective. Lower is better.
pub type Cost = f64;
