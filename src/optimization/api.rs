//! High-level entry point for a one-shot bounded fit.
//!
//! Builds a [`Problem`] from its parts, runs the chosen strategy on the
//! calling thread, and collects the [`FitOutcome`]. Callers who need to
//! observe, pause or cancel a run construct the `Problem` themselves and
//! call [`Minimizer::minimize`] from a worker thread.
use crate::optimization::{
    errors::OptResult,
    problem::{Bounds, FitOutcome, MinimiserConfig, Objective, Problem, Theta},
    strategies::{Minimizer, Strategy},
};

/// Minimize `objective` over `bounds` starting from `initial`.
///
/// # Behavior
/// - Constructs a [`Problem`] (validating dimensions and clamping the
///   initial guess into the bounds).
/// - Runs `strategy` to completion.
/// - Returns the final vector, its cost, the number of accepted steps and
///   the termination reason.
///
/// # Errors
/// - Propagates construction errors from [`Problem::new`].
/// - Propagates objective errors raised during the run.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_reflectivity::optimization::prelude::*;
///
/// let bounds = Bounds::new(array![-4.0, -4.0], array![4.0, 4.0])?;
/// let strategy = Strategy::from_kind("hill_climbing".parse()?, 0.25, 0.25, 1)?;
/// let out = minimize(
///     |theta: &Theta| -> OptResult<Cost> { Ok(theta.dot(theta)) },
///     array![2.0, -2.0],
///     bounds,
///     MinimiserConfig::default(),
///     &strategy,
/// )?;
/// println!("θ̂ = {}", out.theta_hat);
/// # Ok::<(), rust_reflectivity::optimization::errors::OptError>(())
/// ```
pub fn minimize<O>(
    objective: O, initial: Theta, bounds: Bounds, config: MinimiserConfig, strategy: &Strategy,
) -> OptResult<FitOutcome>
where
    O: Objective + 'static,
{
    let problem = Problem::new(initial, bounds, objective, config)?;
    strategy.minimize(&problem)?;
    problem.outcome()
}
