//! problem::config — run-level configuration supplied by the host.
//!
//! Purpose
//! -------
//! Bundle the knobs that belong to a fit run rather than to a strategy:
//! the iteration budget, whether callers may read or pause the problem
//! while a strategy is active, and log verbosity.
//!
//! Conventions
//! -----------
//! - `MinimiserConfig::new` validates; `Default` is always valid.
//! - `verbose` only changes log levels (per-step lines at `info` instead of
//!   `debug`); it never changes search behavior.
use crate::optimization::errors::{OptError, OptResult};

/// Default iteration budget used by [`MinimiserConfig::default`].
pub const DEFAULT_ITERATION_BUDGET: usize = 1_000;

/// MinimiserConfig — iteration budget and concurrency mode of a run.
///
/// Fields
/// ------
/// - `iteration_budget`: upper bound on accepted steps; strictly positive.
/// - `concurrent_reads`: when `true`, callers may snapshot parameters and
///   pause/resume while the strategy runs.
/// - `verbose`: promote per-step log lines from `debug` to `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimiserConfig {
    pub iteration_budget: usize,
    pub concurrent_reads: bool,
    pub verbose: bool,
}

impl MinimiserConfig {
    /// Construct a validated configuration.
    ///
    /// # Errors
    /// - [`OptError::InvalidBudget`] if `iteration_budget == 0`.
    pub fn new(iteration_budget: usize, concurrent_reads: bool, verbose: bool) -> OptResult<Self> {
        if iteration_budget == 0 {
            return Err(OptError::InvalidBudget {
                budget: iteration_budget,
                reason: "Iteration budget must be greater than zero.",
            });
        }
        Ok(Self { iteration_budget, concurrent_reads, verbose })
    }
}

impl Default for MinimiserConfig {
    fn default() -> Self {
        Self { iteration_budget: DEFAULT_ITERATION_BUDGET, concurrent_reads: true, verbose: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // A zero budget can never start a run and is rejected up front.
    //
    // Given
    // -----
    // - `iteration_budget = 0`.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidBudget { budget: 0, .. })`.
    fn new_rejects_zero_budget() {
        match MinimiserConfig::new(0, true, false).unwrap_err() {
            OptError::InvalidBudget { budget, .. } => assert_eq!(budget, 0),
            other => panic!("expected InvalidBudget, got {other:?}"),
        }
    }

    #[test]
    fn new_preserves_inputs() {
        let cfg = MinimiserConfig::new(42, false, true).unwrap();

        assert_eq!(cfg.iteration_budget, 42);
        assert!(!cfg.concurrent_reads);
        assert!(cfg.verbose);
    }
}
