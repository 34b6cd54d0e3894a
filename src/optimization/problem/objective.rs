//! problem::objective — the opaque scalar cost the strategies minimize.
//!
//! Purpose
//! -------
//! Define the single seam between the search engine and whatever the host
//! application wants minimized. The engine never looks inside an objective:
//! it hands over a cloned parameter vector and receives a cost.
//!
//! Key behaviors
//! -------------
//! - [`Objective`] is implemented for every `Fn(&Theta) -> OptResult<Cost>`
//!   that is `Send + Sync`, so plain closures work.
//! - [`evaluate`] is the only call path the strategies use; it rejects NaN
//!   costs so that a broken objective can never be mistaken for an
//!   improvement. Infinite costs are legal and compare as usual.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are synchronous and must not touch the `Problem` they are
//!   installed in; they are called concurrently from worker threads.
use crate::optimization::{
    errors::{OptError, OptResult},
    problem::types::{Cost, Theta},
};

/// User-supplied cost function. Lower is better.
pub trait Objective: Send + Sync {
    fn value(&self, theta: &Theta) -> OptResult<Cost>;
}

impl<F> Objective for F
where
    F: Fn(&Theta) -> OptResult<Cost> + Send + Sync,
{
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        self(theta)
    }
}

/// Evaluate `objective` at `theta`, rejecting NaN.
///
/// # Errors
/// - Propagates any error from the objective.
/// - [`OptError::NanCost`] if the objective returns NaN.
pub fn evaluate(objective: &dyn Objective, theta: &Theta) -> OptResult<Cost> {
    let cost = objective.value(theta)?;
    if cost.is_nan() {
        return Err(OptError::NanCost);
    }
    Ok(cost)
}
