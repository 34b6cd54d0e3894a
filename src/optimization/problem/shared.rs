//! problem::shared — the optimization problem shared by strategy and callers.
//!
//! Purpose
//! -------
//! Own the state of one fit run (parameter vector, bounds, objective,
//! iteration budget) and expose it safely to a running strategy and to any
//! number of concurrent observers.
//!
//! Key behaviors
//! -------------
//! - All mutable state lives in one `RwLock<ProblemState>`. Strategies take
//!   the write lock around every mutation (coordinate write, budget change);
//!   readers take the read lock for snapshots.
//! - Pause/resume use the separate [`RunGate`]; write-backs pass through the
//!   gate, so `pause` returning means no further step will be written until
//!   `resume`.
//! - Cancellation is cooperative: [`Problem::cancel`] zeroes the budget,
//!   which every strategy polls at the top of each iteration.
//!
//! Invariants & assumptions
//! ------------------------
//! - `theta.len() == bounds.len()` and `theta` always lies inside the
//!   bounds; the initial guess is clamped on construction.
//! - The budget only increases when a staged strategy hands a new stage its
//!   share; otherwise it is non-increasing.
//! - Without `concurrent_reads`, parameters may only be read once the budget
//!   has reached zero.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction errors, read rules in both concurrency
//!   modes, pause/resume/cancel transitions and the outcome snapshot.
//! - Pausing a live strategy is exercised in `tests/`.
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;

use crate::optimization::{
    errors::{OptError, OptResult},
    problem::{
        bounds::Bounds,
        config::MinimiserConfig,
        gate::{RunGate, RunState},
        objective::{Objective, evaluate},
        types::{Cost, Theta},
        validation::verify_dimension,
    },
};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No neighbor improved on the current cost.
    LocalOptimum,
    /// The iteration budget was used up.
    BudgetExhausted,
    /// [`Problem::cancel`] was called.
    Cancelled,
    /// The objective reported an error; the run stopped early.
    Failed,
}

/// Point-in-time view of a problem for observers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemStatus {
    pub budget: usize,
    pub steps: usize,
    pub cost: Option<Cost>,
    pub paused: bool,
    pub termination: Option<Termination>,
}

/// Result of a finished run.
///
/// - `theta_hat`: final parameter vector (always inside the bounds).
/// - `cost`: objective value at `theta_hat`, if it was ever evaluated.
/// - `steps`: accepted improvement steps over the whole run.
/// - `termination`: why the run stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub theta_hat: Theta,
    pub cost: Option<Cost>,
    pub steps: usize,
    pub termination: Termination,
}

#[derive(Debug)]
struct ProblemState {
    theta: Theta,
    budget: usize,
    steps: usize,
    cost: Option<Cost>,
    cancelled: bool,
    termination: Option<Termination>,
}

/// Snapshot handed to a strategy at the top of an iteration.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    pub theta: Theta,
    pub cost: Option<Cost>,
}

/// Problem — shared, lock-guarded state of a single fit run.
///
/// Construct once per run with [`Problem::new`], hand `&Problem` to a
/// strategy's `minimize`, and read results back with
/// [`Problem::read_current_parameters`] or [`Problem::outcome`]. `Problem` is
/// `Sync`; share it across threads with `Arc` or scoped threads.
pub struct Problem {
    state: RwLock<ProblemState>,
    gate: RunGate,
    bounds: Bounds,
    objective: Box<dyn Objective>,
    config: MinimiserConfig,
}

impl std::fmt::Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("state", &self.state)
            .field("gate", &self.gate)
            .field("bounds", &self.bounds)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Problem {
    /// Create a problem from an initial guess, bounds, objective and config.
    ///
    /// The initial guess is not validated against the bounds; coordinates
    /// outside them are clamped (and logged at `warn`).
    ///
    /// # Errors
    /// - [`OptError::DimensionMismatch`] if `initial.len() != bounds.len()`.
    pub fn new<O>(
        initial: Theta, bounds: Bounds, objective: O, config: MinimiserConfig,
    ) -> OptResult<Self>
    where
        O: Objective + 'static,
    {
        verify_dimension("initial parameters", bounds.len(), initial.len())?;
        let mut theta = initial;
        if bounds.clamp_all(&mut theta) {
            warn!("initial parameters lay outside their bounds and were clamped to {theta}");
        }
        let state = ProblemState {
            theta,
            budget: config.iteration_budget,
            steps: 0,
            cost: None,
            cancelled: false,
            termination: None,
        };
        Ok(Self {
            state: RwLock::new(state),
            gate: RunGate::new(),
            bounds,
            objective: Box::new(objective),
            config,
        })
    }

    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn config(&self) -> &MinimiserConfig {
        &self.config
    }

    /// Snapshot of the current parameter vector.
    ///
    /// # Errors
    /// - [`OptError::Busy`] without `concurrent_reads` while the budget is
    ///   non-zero.
    pub fn read_current_parameters(&self) -> OptResult<Theta> {
        let state = self.read()?;
        if !self.config.concurrent_reads && state.budget != 0 {
            return Err(OptError::Busy);
        }
        Ok(state.theta.clone())
    }

    pub fn remaining_budget(&self) -> OptResult<usize> {
        Ok(self.read()?.budget)
    }

    /// Stop further steps until [`Problem::resume`].
    ///
    /// Blocks until any in-flight write-back completes. Evaluations already
    /// running finish, but their results are not written while paused.
    ///
    /// # Errors
    /// - [`OptError::ConcurrentReadsDisabled`] without `concurrent_reads`.
    /// - [`OptError::NotRunning`] once the budget is zero.
    /// - [`OptError::AlreadyPaused`] on a second pause.
    pub fn pause(&self) -> OptResult<()> {
        if !self.config.concurrent_reads {
            return Err(OptError::ConcurrentReadsDisabled);
        }
        if self.read()?.budget == 0 {
            return Err(OptError::NotRunning);
        }
        self.gate.pause()
    }

    /// Release a pause.
    ///
    /// # Errors
    /// - [`OptError::NotPaused`] without a prior successful pause.
    pub fn resume(&self) -> OptResult<()> {
        self.gate.resume()
    }

    /// Cancel the run: zero the budget and release any pause so the strategy
    /// can observe the cancellation and return.
    pub fn cancel(&self) -> OptResult<()> {
        {
            let mut state = self.write()?;
            state.budget = 0;
            state.cancelled = true;
            state.termination = Some(Termination::Cancelled);
        }
        self.gate.release()
    }

    pub fn is_cancelled(&self) -> OptResult<bool> {
        Ok(self.read()?.cancelled)
    }

    pub fn status(&self) -> OptResult<ProblemStatus> {
        let paused = self.gate.state()? == RunState::Paused;
        let state = self.read()?;
        Ok(ProblemStatus {
            budget: state.budget,
            steps: state.steps,
            cost: state.cost,
            paused,
            termination: state.termination,
        })
    }

    /// Final result of the run.
    ///
    /// # Errors
    /// - [`OptError::Busy`] while the budget is non-zero.
    pub fn outcome(&self) -> OptResult<FitOutcome> {
        let state = self.read()?;
        if state.budget != 0 {
            return Err(OptError::Busy);
        }
        Ok(FitOutcome {
            theta_hat: state.theta.clone(),
            cost: state.cost,
            steps: state.steps,
            termination: state.termination.unwrap_or(Termination::BudgetExhausted),
        })
    }

    // ---- Strategy-facing surface ----

    /// Evaluate the objective at `theta`.
    pub(crate) fn evaluate(&self, theta: &Theta) -> OptResult<Cost> {
        evaluate(self.objective.as_ref(), theta)
    }

    /// Wait while paused, then return a snapshot, or `None` once the budget
    /// is zero.
    pub(crate) fn checkpoint(&self) -> OptResult<Option<Checkpoint>> {
        self.gate.wait_until_running()?;
        let state = self.read()?;
        if state.budget == 0 {
            return Ok(None);
        }
        Ok(Some(Checkpoint { theta: state.theta.clone(), cost: state.cost }))
    }

    /// Snapshot regardless of budget or read mode.
    pub(crate) fn snapshot(&self) -> OptResult<Checkpoint> {
        let state = self.read()?;
        Ok(Checkpoint { theta: state.theta.clone(), cost: state.cost })
    }

    /// Record the cost of the current vector without consuming budget.
    pub(crate) fn record_cost(&self, cost: Cost) -> OptResult<()> {
        self.gate.pass(|| {
            self.write()?.cost = Some(cost);
            Ok(())
        })
    }

    /// Write `value` (clamped) into coordinate `index`, record `cost`, and
    /// consume one unit of budget.
    ///
    /// Returns `false` without writing if the budget is already zero.
    pub(crate) fn commit_step(&self, index: usize, value: f64, cost: Cost) -> OptResult<bool> {
        self.gate.pass(|| {
            let mut state = self.write()?;
            if state.budget == 0 {
                return Ok(false);
            }
            state.theta[index] = self.bounds.clamp(index, value);
            state.cost = Some(cost);
            state.budget -= 1;
            state.steps += 1;
            if state.budget == 0 && state.termination.is_none() {
                state.termination = Some(Termination::BudgetExhausted);
            }
            Ok(true)
        })
    }

    /// Hand a fresh budget to the next stage of a staged run.
    ///
    /// Returns `false` without changing anything once the run is cancelled.
    pub(crate) fn set_budget(&self, budget: usize) -> OptResult<bool> {
        self.gate.pass(|| {
            let mut state = self.write()?;
            if state.cancelled {
                return Ok(false);
            }
            state.budget = budget;
            state.termination = None;
            Ok(true)
        })
    }

    /// Zero the budget and record why the run stopped, unless a reason was
    /// already recorded.
    pub(crate) fn finish(&self, termination: Termination) -> OptResult<()> {
        self.gate.pass(|| {
            let mut state = self.write()?;
            state.budget = 0;
            if state.termination.is_none() {
                state.termination = Some(termination);
            }
            Ok(())
        })
    }

    pub(crate) fn step_level(&self) -> log::Level {
        if self.config.verbose { log::Level::Info } else { log::Level::Debug }
    }

    fn read(&self) -> OptResult<RwLockReadGuard<'_, ProblemState>> {
        self.state.read().map_err(|_| OptError::LockPoisoned { what: "problem state" })
    }

    fn write(&self) -> OptResult<RwLockWriteGuard<'_, ProblemState>> {
        self.state.write().map_err(|_| OptError::LockPoisoned { what: "problem state" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction failures and clamping of the initial guess.
    // - Read rules with and without concurrent reads.
    // - Pause/resume/cancel transitions and the outcome snapshot.
    //
    // They intentionally DO NOT cover:
    // - Pausing a strategy mid-run (integration tests in `tests/`).
    // -------------------------------------------------------------------------

    fn sphere(theta: &Theta) -> OptResult<Cost> {
        Ok(theta.dot(theta))
    }

    fn square_bounds(n: usize) -> Bounds {
        Bounds::new(Theta::from_elem(n, -4.0), Theta::from_elem(n, 4.0)).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // An initial guess whose length disagrees with the bounds fails before any
    // strategy can run.
    //
    // Given
    // -----
    // - Bounds in ℝ², initial guess in ℝ³.
    //
    // Expect
    // ------
    // - `Err(OptError::DimensionMismatch { expected: 2, found: 3, .. })`.
    fn new_rejects_initial_length_mismatch() {
        let err = Problem::new(
            array![0.0, 0.0, 0.0],
            square_bounds(2),
            sphere,
            MinimiserConfig::default(),
        )
        .unwrap_err();

        match err {
            OptError::DimensionMismatch { expected, found, .. } => {
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Out-of-bounds initial guesses are clamped so no snapshot ever leaves the
    // box.
    //
    // Given
    // -----
    // - Bounds `[-4, 4]²` and initial `(10, -10)`.
    //
    // Expect
    // ------
    // - The first snapshot is `(4, -4)`.
    fn new_clamps_initial_guess() {
        let problem =
            Problem::new(array![10.0, -10.0], square_bounds(2), sphere, MinimiserConfig::default())
                .unwrap();

        assert_eq!(problem.read_current_parameters().unwrap(), array![4.0, -4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Without concurrent reads, parameters are readable only after the run.
    //
    // Given
    // -----
    // - `concurrent_reads = false`, budget 10.
    //
    // Expect
    // ------
    // - Reading returns `Busy` and pausing returns `ConcurrentReadsDisabled`.
    // - After `cancel`, reading succeeds.
    fn non_concurrent_reads_require_finished_run() {
        let cfg = MinimiserConfig::new(10, false, false).unwrap();
        let problem = Problem::new(array![1.0, 1.0], square_bounds(2), sphere, cfg).unwrap();

        assert_eq!(problem.read_current_parameters().unwrap_err(), OptError::Busy);
        assert_eq!(problem.pause().unwrap_err(), OptError::ConcurrentReadsDisabled);

        problem.cancel().unwrap();

        assert_eq!(problem.read_current_parameters().unwrap(), array![1.0, 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Pause/resume misuse is surfaced as errors on the problem itself.
    //
    // Given
    // -----
    // - A concurrent-read problem with a non-zero budget.
    //
    // Expect
    // ------
    // - Second pause fails with `AlreadyPaused`; status reports `paused`.
    // - Unmatched resume fails with `NotPaused`.
    // - Pausing after cancellation fails with `NotRunning`.
    fn pause_resume_transitions() {
        let problem =
            Problem::new(array![1.0], square_bounds(1), sphere, MinimiserConfig::default()).unwrap();

        problem.pause().unwrap();
        assert!(problem.status().unwrap().paused);
        assert_eq!(problem.pause().unwrap_err(), OptError::AlreadyPaused);
        problem.resume().unwrap();
        assert_eq!(problem.resume().unwrap_err(), OptError::NotPaused);

        problem.cancel().unwrap();
        assert_eq!(problem.pause().unwrap_err(), OptError::NotRunning);
    }

    #[test]
    // Purpose
    // -------
    // Committed steps are clamped, consume budget and appear in the outcome.
    //
    // Given
    // -----
    // - Budget 2, one commit pushing coordinate 0 to 9 (above the bound 4),
    //   then a second commit, then a third that must be refused.
    //
    // Expect
    // ------
    // - Coordinate 0 is stored as 4.
    // - Third commit returns `false`; outcome has two steps and
    //   `BudgetExhausted`.
    fn commit_step_clamps_and_consumes_budget() {
        let cfg = MinimiserConfig::new(2, true, false).unwrap();
        let problem = Problem::new(array![0.0, 0.0], square_bounds(2), sphere, cfg).unwrap();

        assert!(problem.commit_step(0, 9.0, 16.0).unwrap());
        assert_eq!(problem.read_current_parameters().unwrap()[0], 4.0);
        assert!(problem.commit_step(1, 1.0, 17.0).unwrap());
        assert!(!problem.commit_step(1, 2.0, 20.0).unwrap());

        let outcome = problem.outcome().unwrap();
        assert_eq!(outcome.steps, 2);
        assert_eq!(outcome.cost, Some(17.0));
        assert_eq!(outcome.termination, Termination::BudgetExhausted);
    }

    #[test]
    // Purpose
    // -------
    // Cancellation wins over later stage budgets and termination reasons.
    //
    // Given
    // -----
    // - A cancelled problem.
    //
    // Expect
    // ------
    // - `set_budget` is refused, `finish(LocalOptimum)` keeps `Cancelled`.
    fn cancel_is_sticky() {
        let problem =
            Problem::new(array![0.0], square_bounds(1), sphere, MinimiserConfig::default()).unwrap();

        problem.cancel().unwrap();

        assert!(problem.is_cancelled().unwrap());
        assert!(!problem.set_budget(5).unwrap());
        problem.finish(Termination::LocalOptimum).unwrap();
        assert_eq!(problem.outcome().unwrap().termination, Termination::Cancelled);
    }
}
