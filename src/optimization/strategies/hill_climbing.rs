//! strategies::hill_climbing — steepest-neighbor hill climbing.
//!
//! Purpose
//! -------
//! Move to the best single-coordinate neighbor at a fixed step size until no
//! neighbor improves the current cost or the budget runs out.
//!
//! Key behaviors
//! -------------
//! - Each iteration evaluates all `2n` neighbors `θ ± δ·e_i` (clamped) in
//!   parallel and joins before choosing.
//! - The lowest cost wins with a strict comparison, so the first candidate
//!   in `(0,+), (0,-), (1,+), ...` order wins ties.
//! - A best neighbor that is not strictly better than the current cost ends
//!   the run with [`Termination::LocalOptimum`] (the budget is set to zero).
//! - Otherwise the single improved coordinate is written back and one unit
//!   of budget is consumed.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only this strategy writes to the problem while it runs, so the cost
//!   recorded on the problem is the cost of its current vector.
//!
//! Testing notes
//! -------------
//! - Unit tests check convergence on `-1/(x²+y²)`, behavior at the bounds,
//!   budget exhaustion, and error propagation from the objective.
use log::{debug, info, log};

use crate::optimization::{
    errors::OptResult,
    problem::{Problem, Termination},
    problem::validation::verify_delta,
    strategies::{
        neighbors::{best_candidate, evaluate_neighbors},
        traits::{Minimizer, fail_on_error},
    },
};

/// HillClimbing — fixed-step steepest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillClimbing {
    min_delta: f64,
}

impl HillClimbing {
    /// # Errors
    /// - [`crate::optimization::errors::OptError::InvalidDelta`] unless
    ///   `min_delta` is finite and positive.
    pub fn new(min_delta: f64) -> OptResult<Self> {
        verify_delta(min_delta)?;
        Ok(Self { min_delta })
    }

    pub fn min_delta(&self) -> f64 {
        self.min_delta
    }
}

impl Minimizer for HillClimbing {
    fn minimize(&self, problem: &Problem) -> OptResult<()> {
        fail_on_error(problem, climb(problem, self.min_delta))
    }
}

/// Run hill climbing at step `delta` until the problem's budget is zero.
pub(crate) fn climb(problem: &Problem, delta: f64) -> OptResult<()> {
    let level = problem.step_level();
    while let Some(checkpoint) = problem.checkpoint()? {
        let current = match checkpoint.cost {
            Some(cost) => cost,
            None => {
                let cost = problem.evaluate(&checkpoint.theta)?;
                problem.record_cost(cost)?;
                cost
            }
        };
        let candidates = evaluate_neighbors(problem, &checkpoint.theta, delta)?;
        match best_candidate(&candidates) {
            Some(best) if best.cost < current => {
                if !problem.commit_step(best.index, best.value, best.cost)? {
                    debug!("budget reached zero before step could be written");
                    break;
                }
                log!(
                    level,
                    "hill climbing: θ[{}] -> {} (cost {} -> {})",
                    best.index,
                    best.value,
                    current,
                    best.cost
                );
            }
            _ => {
                info!("hill climbing: local optimum at cost {current} (delta = {delta})");
                problem.finish(Termination::LocalOptimum)?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        problem::{Bounds, Cost, MinimiserConfig, Theta},
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence to a local optimum and the termination reason.
    // - Respecting bounds and the iteration budget.
    // - Propagation of objective errors.
    //
    // They intentionally DO NOT cover:
    // - Pausing during a run (integration tests).
    // -------------------------------------------------------------------------

    fn inverse_radius(theta: &Theta) -> OptResult<Cost> {
        Ok(-1.0 / theta.dot(theta))
    }

    fn square(half_width: f64, n: usize) -> Bounds {
        Bounds::new(Theta::from_elem(n, -half_width), Theta::from_elem(n, half_width)).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Hill climbing reaches the origin on `f(x, y) = -1/(x² + y²)`.
    //
    // Given
    // -----
    // - Start `(2, -2)`, bounds `[-4, 4]²`, `delta = 0.25`, budget 10 000.
    //
    // Expect
    // ------
    // - Final vector within 1e-6 of `(0, 0)`.
    // - Termination is `LocalOptimum` and the budget is zero.
    fn converges_to_origin_on_inverse_radius() {
        let cfg = MinimiserConfig::new(10_000, true, false).unwrap();
        let problem = Problem::new(array![2.0, -2.0], square(4.0, 2), inverse_radius, cfg).unwrap();

        HillClimbing::new(0.25).unwrap().minimize(&problem).unwrap();

        let outcome = problem.outcome().unwrap();
        assert!(outcome.theta_hat.iter().all(|v| v.abs() < 1e-6), "got {}", outcome.theta_hat);
        assert_eq!(outcome.termination, Termination::LocalOptimum);
        assert_eq!(problem.remaining_budget().unwrap(), 0);
    }

    #[test]
    // Purpose
    // -------
    // A minimum outside the box pins the search to the nearest bound.
    //
    // Given
    // -----
    // - `f(x) = (x - 10)²`, bounds `[0, 1]`, start 0, `delta = 0.3`.
    //
    // Expect
    // ------
    // - Final value is exactly 1 and never exceeds it.
    fn stops_at_upper_bound() {
        let f = |theta: &Theta| -> OptResult<Cost> { Ok((theta[0] - 10.0).powi(2)) };
        let bounds = Bounds::new(array![0.0], array![1.0]).unwrap();
        let problem = Problem::new(array![0.0], bounds, f, MinimiserConfig::default()).unwrap();

        HillClimbing::new(0.3).unwrap().minimize(&problem).unwrap();

        assert_eq!(problem.read_current_parameters().unwrap()[0], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // The budget caps the number of accepted steps.
    //
    // Given
    // -----
    // - Unbounded linear objective `f(x) = x`, budget 5, `delta = 1`.
    //
    // Expect
    // ------
    // - Exactly 5 steps, `x = -5`, termination `BudgetExhausted`.
    fn budget_caps_steps() {
        let f = |theta: &Theta| -> OptResult<Cost> { Ok(theta[0]) };
        let cfg = MinimiserConfig::new(5, false, false).unwrap();
        let problem = Problem::new(array![0.0], Bounds::unbounded(1).unwrap(), f, cfg).unwrap();

        HillClimbing::new(1.0).unwrap().minimize(&problem).unwrap();

        let outcome = problem.outcome().unwrap();
        assert_eq!(outcome.steps, 5);
        assert_eq!(outcome.theta_hat[0], -5.0);
        assert_eq!(outcome.termination, Termination::BudgetExhausted);
    }

    #[test]
    // Purpose
    // -------
    // Objective errors abort the run and leave it finished as `Failed`.
    //
    // Given
    // -----
    // - An objective that fails for `x < -1`, start 0, `delta = 1`, `f(x) = x`.
    //
    // Expect
    // ------
    // - `minimize` returns the objective's error.
    // - The outcome is readable and reports `Failed`.
    fn objective_errors_abort_the_run() {
        let f = |theta: &Theta| -> OptResult<Cost> {
            if theta[0] < -1.0 {
                return Err(OptError::Objective { text: "out of model domain".to_string() });
            }
            Ok(theta[0])
        };
        let problem =
            Problem::new(array![0.0], Bounds::unbounded(1).unwrap(), f, MinimiserConfig::default())
                .unwrap();

        let err = HillClimbing::new(1.0).unwrap().minimize(&problem).unwrap_err();

        assert!(matches!(err, OptError::Objective { .. }));
        assert_eq!(problem.outcome().unwrap().termination, Termination::Failed);
    }
}
