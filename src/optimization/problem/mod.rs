//! problem — bounded parameter vector, objective seam and shared run state.
//!
//! Purpose
//! -------
//! Provide everything a search strategy operates on: the parameter vector
//! and its box constraints, the opaque objective, the run configuration,
//! and the lock-guarded [`Problem`] that strategies mutate and callers
//! observe.
//!
//! Key behaviors
//! -------------
//! - [`Bounds`] validates box constraints and owns the clamping rule.
//! - [`Objective`] is the `θ → cost` seam; closures implement it directly.
//! - [`MinimiserConfig`] carries the iteration budget and concurrency mode.
//! - [`Problem`] guards the run state behind one `RwLock` and pauses via a
//!   separate run gate (`gate`), so pausing never repurposes the data lock.
//!
//! Invariants & assumptions
//! ------------------------
//! - A problem's dimension is fixed at construction.
//! - Parameter values never leave their bounds, including in snapshots.
//! - Only one strategy runs on a problem at a time; observers may be many.
//!
//! Downstream usage
//! ----------------
//! - Build a `Problem`, pass `&problem` to a strategy's `minimize`, and read
//!   results with `read_current_parameters` / `outcome`.
//! - From another thread: `status`, `pause`, `resume`, `cancel`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own contract; live
//!   pause/cancel behavior is covered by the integration tests.

pub mod bounds;
pub mod config;
pub mod gate;
pub mod objective;
pub mod shared;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bounds::Bounds;
pub use self::config::{DEFAULT_ITERATION_BUDGET, MinimiserConfig};
pub use self::gate::RunState;
pub use self::objective::Objective;
pub use self::shared::{FitOutcome, Problem, ProblemStatus, Termination};
pub use self::types::{Cost, Theta};
