//! optimization::errors — unified error surface for the fitting engine.
//!
//! Purpose
//! -------
//! Collect every failure the optimization layer can report (configuration
//! mistakes, run-gate misuse, numerical problems in the objective, and
//! forward-model failures) into a single enum with a common result alias.
//!
//! Conventions
//! -----------
//! - Configuration errors are raised by constructors and never by the
//!   strategies themselves.
//! - Forward-model errors are wrapped verbatim in [`OptError::Model`] so the
//!   caller can still match on the original [`ModelError`].
//! - Local-optimum detection is not an error and has no variant here.
use crate::reflectivity::errors::ModelError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Problem construction ----
    /// The parameter vector has no entries.
    EmptyParameterVector,

    /// Two vectors that must have equal length do not.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Bound pair is NaN or has `min > max`.
    InvalidBounds {
        index: usize,
        min: f64,
        max: f64,
        reason: &'static str,
    },

    // ---- MinimiserConfig / strategy configuration ----
    /// Iteration budget must be positive.
    InvalidBudget {
        budget: usize,
        reason: &'static str,
    },
    /// Step sizes must be finite and positive.
    InvalidDelta {
        delta: f64,
        reason: &'static str,
    },
    /// Staged hill-climbing needs at least one stage.
    InvalidStageCount {
        stages: usize,
        reason: &'static str,
    },
    /// Unknown strategy name.
    InvalidStrategy {
        name: String,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned NaN.
    NanCost,
    /// Failure reported by a user-supplied objective.
    Objective {
        text: String,
    },
    /// Forward-model failure raised inside an objective evaluation.
    Model(ModelError),

    // ---- Run gate / locking ----
    /// Parameters cannot be read while a non-concurrent run is active.
    Busy,
    /// Pausing requires `concurrent_reads`.
    ConcurrentReadsDisabled,
    /// Pausing requires a non-zero budget.
    NotRunning,
    /// `pause` was called twice without an intervening `resume`.
    AlreadyPaused,
    /// `resume` was called without a prior `pause`.
    NotPaused,
    /// A thread panicked while holding one of the problem's locks.
    LockPoisoned {
        what: &'static str,
    },
}

impl std::error::Error for OptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Problem construction ----
            OptError::EmptyParameterVector => {
                write!(f, "Parameter vector must contain at least one entry")
            }
            OptError::DimensionMismatch { what, expected, found } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, found {found}")
            }
            OptError::InvalidBounds { index, min, max, reason } => {
                write!(f, "Invalid bounds at index {index}: [{min}, {max}]: {reason}")
            }

            // ---- MinimiserConfig / strategy configuration ----
            OptError::InvalidBudget { budget, reason } => {
                write!(f, "Invalid iteration budget {budget}: {reason}")
            }
            OptError::InvalidDelta { delta, reason } => {
                write!(f, "Invalid step size {delta}: {reason}")
            }
            OptError::InvalidStageCount { stages, reason } => {
                write!(f, "Invalid stage count {stages}: {reason}")
            }
            OptError::InvalidStrategy { name, reason } => {
                write!(f, "Invalid strategy '{name}': {reason}")
            }

            // ---- Objective ----
            OptError::NanCost => write!(f, "Objective returned NaN"),
            OptError::Objective { text } => write!(f, "Objective failed: {text}"),
            OptError::Model(err) => write!(f, "Forward model failed: {err}"),

            // ---- Run gate / locking ----
            OptError::Busy => {
                write!(f, "Problem is busy: parameters are only readable once the run has finished")
            }
            OptError::ConcurrentReadsDisabled => {
                write!(f, "Pause requires concurrent reads to be enabled")
            }
            OptError::NotRunning => write!(f, "Pause requires a non-zero iteration budget"),
            OptError::AlreadyPaused => write!(f, "Problem is already paused"),
            OptError::NotPaused => write!(f, "Problem is not paused"),
            OptError::LockPoisoned { what } => write!(f, "Lock poisoned: {what}"),
        }
    }
}

impl From<ModelError> for OptError {
    fn from(err: ModelError) -> Self {
        OptError::Model(err)
    }
}
