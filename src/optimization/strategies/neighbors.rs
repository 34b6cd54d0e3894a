//! strategies::neighbors — candidate generation and parallel evaluation.
//!
//! A neighbor of `θ` differs from it in exactly one coordinate, moved by
//! `±delta` and clamped into the bounds. Candidates are ordered
//! `(0, +), (0, -), (1, +), (1, -), ...`; that order is the tie-break.
use rayon::prelude::*;

use crate::optimization::{
    errors::OptResult,
    problem::{Bounds, Cost, Problem, Theta},
};

/// One evaluated neighbor: coordinate `index` set to `value` costs `cost`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub index: usize,
    pub value: f64,
    pub cost: Cost,
}

/// The `2n` single-coordinate moves around `theta`, clamped into `bounds`.
pub(crate) fn neighbor_moves(bounds: &Bounds, theta: &Theta, delta: f64) -> Vec<(usize, f64)> {
    theta
        .iter()
        .enumerate()
        .flat_map(|(index, &x)| {
            [(index, bounds.clamp(index, x + delta)), (index, bounds.clamp(index, x - delta))]
        })
        .collect()
}

/// Evaluate every neighbor of `theta` on the rayon pool and join.
///
/// Each candidate is evaluated on its own clone of `theta`. The returned
/// vector keeps the order of [`neighbor_moves`].
///
/// # Errors
/// Returns the first objective error encountered.
pub(crate) fn evaluate_neighbors(
    problem: &Problem, theta: &Theta, delta: f64,
) -> OptResult<Vec<Candidate>> {
    neighbor_moves(problem.bounds(), theta, delta)
        .into_par_iter()
        .map(|(index, value)| {
            let mut candidate = theta.clone();
            candidate[index] = value;
            problem.evaluate(&candidate).map(|cost| Candidate { index, value, cost })
        })
        .collect()
}

/// Lowest-cost candidate; the first one wins on ties.
pub(crate) fn best_candidate(candidates: &[Candidate]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        match best {
            Some(current) if candidate.cost >= current.cost => {}
            _ => best = Some(*candidate),
        }
    }
    best
}
