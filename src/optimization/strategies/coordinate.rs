//! strategies::coordinate — one concurrent worker per coordinate.
//!
//! Purpose
//! -------
//! Search each coordinate independently on the rayon pool. Worker `i` only
//! ever writes coordinate `i`, so writes from different workers never touch
//! the same element.
//!
//! Key behaviors
//! -------------
//! - Each worker iteration snapshots the shared vector, then evaluates the
//!   snapshot and its two neighbors along coordinate `i` concurrently
//!   (`rayon::join`).
//! - A neighbor strictly better than the snapshot is written back through
//!   the problem's gate and consumes one unit of the shared budget.
//! - A worker stops when neither neighbor improves, when the shared budget
//!   is zero, or after as many iterations as the starting budget.
//! - After all workers join, the final vector is evaluated once more so the
//!   recorded cost matches it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Workers read coordinates owned by other workers without coordination.
//!   A worker's decision can therefore be based on a vector that another
//!   worker has already moved; the recorded cost is only exact after the
//!   final re-evaluation.
use log::{debug, info, log};
use rayon::prelude::*;

use crate::optimization::{
    errors::OptResult,
    problem::{Problem, Termination, validation::verify_delta},
    strategies::traits::{Minimizer, fail_on_error},
};

/// ParallelCoordinateSearch — per-coordinate concurrent hill climbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelCoordinateSearch {
    min_delta: f64,
}

impl ParallelCoordinateSearch {
    /// # Errors
    /// - `OptError::InvalidDelta` unless `min_delta` is finite and positive.
    pub fn new(min_delta: f64) -> OptResult<Self> {
        verify_delta(min_delta)?;
        Ok(Self { min_delta })
    }

    pub fn min_delta(&self) -> f64 {
        self.min_delta
    }

    fn run(&self, problem: &Problem) -> OptResult<()> {
        let cap = problem.remaining_budget()?;
        info!(
            "parallel coordinate search: {} workers, delta = {}, budget = {cap}",
            problem.dim(),
            self.min_delta
        );
        (0..problem.dim())
            .into_par_iter()
            .try_for_each(|index| search_coordinate(problem, index, self.min_delta, cap))?;

        let last = problem.snapshot()?;
        let cost = problem.evaluate(&last.theta)?;
        problem.record_cost(cost)?;
        info!("parallel coordinate search: finished at cost {cost}");
        problem.finish(Termination::LocalOptimum)
    }
}

impl Minimizer for ParallelCoordinateSearch {
    fn minimize(&self, problem: &Problem) -> OptResult<()> {
        fail_on_error(problem, self.run(problem))
    }
}

fn search_coordinate(problem: &Problem, index: usize, delta: f64, cap: usize) -> OptResult<()> {
    let level = problem.step_level();
    let bounds = problem.bounds();
    for _ in 0..cap {
        let Some(checkpoint) = problem.checkpoint()? else {
            return Ok(());
        };
        let base = checkpoint.theta;
        let x = base[index];
        let up = bounds.clamp(index, x + delta);
        let down = bounds.clamp(index, x - delta);

        let mut plus = base.clone();
        plus[index] = up;
        let mut minus = base.clone();
        minus[index] = down;
        let (base_cost, (plus_cost, minus_cost)) = rayon::join(
            || problem.evaluate(&base),
            || rayon::join(|| problem.evaluate(&plus), || problem.evaluate(&minus)),
        );
        let (base_cost, plus_cost, minus_cost) = (base_cost?, plus_cost?, minus_cost?);

        let (value, cost) =
            if minus_cost < plus_cost { (down, minus_cost) } else { (up, plus_cost) };
        if cost >= base_cost {
            debug!("coordinate {index}: no improving move at {x}");
            return Ok(());
        }
        if !problem.commit_step(index, value, cost)? {
            return Ok(());
        }
        log!(level, "coordinate {index}: {x} -> {value} (cost {base_cost} -> {cost})");
    }
    Ok(())
}
