//! Public strategy surface.
//!
//! - [`Minimizer`]: trait every search strategy implements.
//! - [`StrategyKind`]: name of a strategy, parsed case-insensitively.
//! - [`Strategy`]: the closed set of strategies, chosen at configuration time.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    problem::{Problem, Termination},
    strategies::{
        coordinate::ParallelCoordinateSearch, hill_climbing::HillClimbing,
        staged::StagedHillClimbing,
    },
};

/// A bounded local search over a [`Problem`].
///
/// `minimize` returns once the problem's budget is zero. Results are read
/// back from the problem; nothing is returned on success.
///
/// # Errors
/// Objective errors abort the run. The problem is then finished with
/// [`Termination::Failed`] so observers are not left waiting.
pub trait Minimizer: Send + Sync {
    fn minimize(&self, problem: &Problem) -> OptResult<()>;
}

/// Finish `problem` as failed when `run` errors, then propagate the error.
pub(crate) fn fail_on_error(problem: &Problem, run: OptResult<()>) -> OptResult<()> {
    if let Err(err) = run {
        problem.finish(Termination::Failed)?;
        return Err(err);
    }
    Ok(())
}

/// Name of a search strategy.
///
/// Parsing:
/// Accepts case-insensitive names with `_` or `-` separators:
/// `"hill_climbing"`, `"staged_hill_climbing"`, `"parallel_coordinate"`.
/// Unknown names return [`OptError::InvalidStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    HillClimbing,
    StagedHillClimbing,
    ParallelCoordinate,
}

impl FromStr for StrategyKind {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "hill_climbing" => Ok(StrategyKind::HillClimbing),
            "staged_hill_climbing" => Ok(StrategyKind::StagedHillClimbing),
            "parallel_coordinate" => Ok(StrategyKind::ParallelCoordinate),
            _ => Err(OptError::InvalidStrategy {
                name: s.to_string(),
                reason: "Valid options are 'hill_climbing', 'staged_hill_climbing' or 'parallel_coordinate'.",
            }),
        }
    }
}

/// Strategy — configured search strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    HillClimbing(HillClimbing),
    StagedHillClimbing(StagedHillClimbing),
    ParallelCoordinate(ParallelCoordinateSearch),
}

impl Strategy {
    /// Build a strategy of the given kind.
    ///
    /// `max_delta` and `stage_count` are only consulted by
    /// [`StrategyKind::StagedHillClimbing`].
    ///
    /// # Errors
    /// Propagates the validation errors of the chosen strategy's constructor.
    pub fn from_kind(
        kind: StrategyKind, min_delta: f64, max_delta: f64, stage_count: usize,
    ) -> OptResult<Self> {
        Ok(match kind {
            StrategyKind::HillClimbing => Strategy::HillClimbing(HillClimbing::new(min_delta)?),
            StrategyKind::StagedHillClimbing => Strategy::StagedHillClimbing(
                StagedHillClimbing::new(min_delta, max_delta, stage_count)?,
            ),
            StrategyKind::ParallelCoordinate => {
                Strategy::ParallelCoordinate(ParallelCoordinateSearch::new(min_delta)?)
            }
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::HillClimbing(_) => StrategyKind::HillClimbing,
            Strategy::StagedHillClimbing(_) => StrategyKind::StagedHillClimbing,
            Strategy::ParallelCoordinate(_) => StrategyKind::ParallelCoordinate,
        }
    }
}

impl Minimizer for Strategy {
    fn minimize(&self, problem: &Problem) -> OptResult<()> {
        match self {
            Strategy::HillClimbing(s) => s.minimize(problem),
            Strategy::StagedHillClimbing(s) => s.minimize(problem),
            Strategy::ParallelCoordinate(s) => s.minimize(problem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Strategy names parse regardless of case and separator.
    //
    // Given
    // -----
    // - `"Hill_Climbing"`, `"staged-hill-climbing"`, `"PARALLEL_COORDINATE"`.
    //
    // Expect
    // ------
    // - Each maps to its variant; `"simplex"` is rejected.
    fn strategy_kind_parses_case_insensitively() {
        assert_eq!("Hill_Climbing".parse::<StrategyKind>().unwrap(), StrategyKind::HillClimbing);
        assert_eq!(
            "staged-hill-climbing".parse::<StrategyKind>().unwrap(),
            StrategyKind::StagedHillClimbing
        );
        assert_eq!(
            "PARALLEL_COORDINATE".parse::<StrategyKind>().unwrap(),
            StrategyKind::ParallelCoordinate
        );
        match "simplex".parse::<StrategyKind>().unwrap_err() {
            OptError::InvalidStrategy { name, .. } => assert_eq!(name, "simplex"),
            other => panic!("expected InvalidStrategy, got {other:?}"),
        }
    }

    #[test]
    fn from_kind_validates_parameters() {
        let staged = Strategy::from_kind(StrategyKind::StagedHillClimbing, 0.1, 1.0, 4).unwrap();
        assert_eq!(staged.kind(), StrategyKind::StagedHillClimbing);

        assert!(Strategy::from_kind(StrategyKind::HillClimbing, 0.0, 1.0, 1).is_err());
        assert!(Strategy::from_kind(StrategyKind::StagedHillClimbing, 0.1, 1.0, 0).is_err());
    }
}
