//! strategies::staged — hill climbing on a coarse-to-fine step schedule.
//!
//! Purpose
//! -------
//! Escape shallow local structure with large steps first, then refine with
//! smaller ones. This is a discrete annealing schedule on the step size,
//! not on acceptance probability.
//!
//! Key behaviors
//! -------------
//! - Runs [`climb`] once per stage. Stage `k` (0-based) of `S` uses
//!   `max(min_delta, (max_delta - min_delta) / S * (S - k))`, so step sizes
//!   run from the full range down to `(max_delta - min_delta) / S`.
//! - The caller's budget is split evenly across stages (`total / S`), the
//!   remainder going to the last stage; the sum never exceeds the total.
//! - A cancellation between stages ends the schedule.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each stage restarts from the vector the previous stage ended on.
//! - The final termination reason is that of the last stage that ran.
use log::info;

use crate::optimization::{
    errors::OptResult,
    problem::{
        Problem, Termination,
        validation::{verify_delta_range, verify_stage_count},
    },
    strategies::{
        hill_climbing::climb,
        traits::{Minimizer, fail_on_error},
    },
};

/// StagedHillClimbing — hill climbing with a shrinking step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagedHillClimbing {
    min_delta: f64,
    max_delta: f64,
    stage_count: usize,
}

impl StagedHillClimbing {
    /// # Errors
    /// - `OptError::InvalidDelta` unless `0 < min_delta <= max_delta < ∞`.
    /// - `OptError::InvalidStageCount` if `stage_count == 0`.
    pub fn new(min_delta: f64, max_delta: f64, stage_count: usize) -> OptResult<Self> {
        verify_delta_range(min_delta, max_delta)?;
        verify_stage_count(stage_count)?;
        Ok(Self { min_delta, max_delta, stage_count })
    }

    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    /// Step size used by stage `stage` (0-based).
    pub fn stage_delta(&self, stage: usize) -> f64 {
        let stages = self.stage_count as f64;
        let remaining = self.stage_count.saturating_sub(stage) as f64;
        ((self.max_delta - self.min_delta) / stages * remaining).max(self.min_delta)
    }

    /// Budget of each stage given a total budget.
    pub fn stage_budgets(&self, total: usize) -> Vec<usize> {
        let base = total / self.stage_count;
        let mut budgets = vec![base; self.stage_count];
        if let Some(last) = budgets.last_mut() {
            *last += total % self.stage_count;
        }
        budgets
    }

    fn run(&self, problem: &Problem) -> OptResult<()> {
        let total = problem.remaining_budget()?;
        for (stage, budget) in self.stage_budgets(total).into_iter().enumerate() {
            if budget == 0 {
                continue;
            }
            if !problem.set_budget(budget)? {
                info!("staged hill climbing: cancelled before stage {}", stage + 1);
                break;
            }
            let delta = self.stage_delta(stage);
            info!(
                "staged hill climbing: stage {}/{} with delta = {delta}, budget = {budget}",
                stage + 1,
                self.stage_count
            );
            climb(problem, delta)?;
        }
        problem.finish(Termination::BudgetExhausted)
    }
}

impl Minimizer for StagedHillClimbing {
    fn minimize(&self, problem: &Problem) -> OptResult<()> {
        fail_on_error(problem, self.run(problem))
    }
}
