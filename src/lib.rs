//! rust_reflectivity — fitting layered density profiles to reflectivity data.
//!
//! Purpose
//! -------
//! Serve as the crate root for a small fitting engine: a concurrent,
//! pausable, derivative-free local search over bounded parameters
//! (`optimization`), and the forward physical model it evaluates
//! (`reflectivity`).
//!
//! Key behaviors
//! -------------
//! - `optimization` owns the shared `Problem`, the search strategies and the
//!   one-shot `minimize` entry point.
//! - `reflectivity` builds density profiles from layer parameters, smooths
//!   them, computes reflectivity with the Parratt recursion, and packages
//!   all of it as an objective.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<f64>`; errors are module-level enums with
//!   `Result` aliases (`OptResult`, `ModelResult`).
//! - The crate logs through the `log` facade and never installs a logger;
//!   binaries and tests choose one.
//!
//! Downstream usage
//! ----------------
//! - Build a `ReflectivityObjective`, bound its `3n + 3` parameters, and run
//!   a `Strategy` on a `Problem` (or call `optimization::api::minimize`).
//! - Observe a live run from other threads with `status`,
//!   `read_current_parameters`, `pause`, `resume` and `cancel`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they cover; `tests/` exercises live
//!   runs and an end-to-end fit.

pub mod optimization;
pub mod reflectivity;
