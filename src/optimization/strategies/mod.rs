//! strategies — bounded local search over a shared [`Problem`].
//!
//! Purpose
//! -------
//! Implement the search strategies that perturb, evaluate and write back
//! parameter vectors. Each strategy implements [`Minimizer`]; the closed
//! [`Strategy`] enum selects one at configuration time.
//!
//! Key behaviors
//! -------------
//! - [`HillClimbing`]: best of all `2n` single-coordinate neighbors per step.
//! - [`StagedHillClimbing`]: hill climbing on a coarse-to-fine step schedule.
//! - [`ParallelCoordinateSearch`]: one concurrent worker per coordinate.
//! - Candidate evaluations fan out on the rayon pool and are joined before
//!   any write-back.
//!
//! Invariants & assumptions
//! ------------------------
//! - Strategies never write outside the bounds; neighbors are clamped before
//!   evaluation.
//! - Every run ends with the problem's budget at zero, so observers waiting
//!   on `outcome` always see a result, including after an objective error.
//!
//! Downstream usage
//! ----------------
//! - Build a [`Strategy`] from a [`StrategyKind`] (or a concrete strategy
//!   directly) and call `minimize(&problem)`, typically on a worker thread
//!   while the caller observes the problem.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each strategy; live pause/cancel scenarios are
//!   in the crate's integration tests.
//!
//! [`Problem`]: crate::optimization::problem::Problem

pub mod coordinate;
pub mod hill_climbing;
pub mod staged;
pub mod traits;

mod neighbors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coordinate::ParallelCoordinateSearch;
pub use self::hill_climbing::HillClimbing;
pub use self::staged::StagedHillClimbing;
pub use self::traits::{Minimizer, Strategy, StrategyKind};
