//! optimization — bounded local search with a shared, observable run state.
//!
//! Purpose
//! -------
//! Fit a parameter vector to an opaque scalar cost by derivative-free local
//! search inside box constraints, while letting other threads watch, pause,
//! resume or cancel the run. Callers supply the objective, bounds, initial
//! guess and budget; strategies do the rest.
//!
//! Key behaviors
//! -------------
//! - `problem`: the bounded parameter vector, the `Objective` seam, the run
//!   configuration, and the lock-guarded `Problem` shared by strategy and
//!   observers.
//! - `strategies`: hill climbing, staged hill climbing and parallel
//!   coordinate search behind the `Minimizer` trait.
//! - `api`: a one-shot `minimize` that builds a problem, runs a strategy and
//!   returns the `FitOutcome`.
//! - `errors`: a single `OptError` / `OptResult<T>` surface for
//!   configuration, objective and concurrency failures.
//!
//! Invariants & assumptions
//! ------------------------
//! - Costs are minimized. NaN costs are errors; `±∞` are ordinary values.
//! - Parameter values never leave their bounds.
//! - No strategy retries a failed evaluation; the first objective error ends
//!   the run.
//!
//! Conventions
//! -----------
//! - Parameter vectors are `ndarray::Array1<f64>` (`Theta`), costs are `f64`
//!   (`Cost`).
//! - Per-step progress is logged through the `log` facade at `debug`
//!   (`info` with `MinimiserConfig::verbose`); terminations at `info`.
//!
//! Downstream usage
//! ----------------
//! - `reflectivity::objective::ReflectivityObjective` implements `Objective`
//!   for fitting layer parameters to measured reflectivity.
//! - Front-ends typically import `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover its own contract; `tests/` drives
//!   live runs from observer threads.

pub mod api;
pub mod errors;
pub mod problem;
pub mod strategies;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_reflectivity::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::errors::{OptError, OptResult};
    pub use super::problem::{
        Bounds, Cost, FitOutcome, MinimiserConfig, Objective, Problem, ProblemStatus, Termination,
        Theta,
    };
    pub use super::strategies::{
        HillClimbing, Minimizer, ParallelCoordinateSearch, StagedHillClimbing, Strategy,
        StrategyKind,
    };
}
