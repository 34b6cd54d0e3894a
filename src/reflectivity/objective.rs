//! reflectivity::objective — fitting cost of a layer model against data.
//!
//! Purpose
//! -------
//! Compose the forward model (layer stack → density profile → optional
//! smoothing → reflectivity) with a residual norm against measured data, and
//! expose the result as an [`Objective`] the search strategies can minimize.
//!
//! Key behaviors
//! -------------
//! - [`LayerLayout`] maps a flat parameter vector of length `3n + 3` onto
//!   `n` thicknesses, `n + 2` densities and `n + 1` roughness values, in
//!   that order.
//! - [`ReflectivityData`] validates the measured curve once at construction.
//! - [`Residual`] selects the norm; there is no default, callers choose.
//! - [`ReflectivityObjective::value`] rebuilds the profile from scratch on
//!   every call and never touches shared state, so candidates can be
//!   evaluated concurrently.
//!
//! Invariants & assumptions
//! ------------------------
//! - Forward-model errors surface as `OptError::Model` and end the run.
//! - `LogSquaredError` requires strictly positive observations; model values
//!   are floored at the smallest positive `f64` before taking logs.
//! - `ChiSquared` requires strictly positive, finite uncertainties.
//!
//! Downstream usage
//! ----------------
//! - Build the objective, pair it with bounds on the `3n + 3` parameters,
//!   and hand it to a `Problem` or to `optimization::api::minimize`.
//! - Fix a parameter by giving it equal lower and upper bounds.
use ndarray::{Array1, ArrayView1};

use crate::{
    optimization::{
        errors::OptResult,
        problem::{Cost, Objective, Theta},
    },
    reflectivity::{
        convolution::convolve_roughness,
        errors::{ModelError, ModelResult},
        layers::LayerStack,
        parratt::{ReflectivityCurve, ReflectivityOptions, reflectivity_from_profile},
        profile::build_density_profile,
    },
};

/// Mapping from a flat parameter vector to a [`LayerStack`].
///
/// Layout of `θ` for `n` layers:
/// `[t₀ .. tₙ₋₁, ρ₀ .. ρₙ₊₁, σ₀ .. σₙ]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerLayout {
    layers: usize,
}

impl LayerLayout {
    pub fn new(layers: usize) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Length of a parameter vector in this layout (`3n + 3`).
    pub fn parameter_count(&self) -> usize {
        3 * self.layers + 3
    }

    /// Flatten layer parameters into `θ`.
    ///
    /// # Errors
    /// - `ModelError::LayerCountMismatch` if the counts do not match `n`.
    pub fn pack(
        &self, thickness: &[f64], density: &[f64], roughness: &[f64],
    ) -> ModelResult<Theta> {
        let n = self.layers;
        if thickness.len() != n || density.len() != n + 2 || roughness.len() != n + 1 {
            return Err(ModelError::LayerCountMismatch {
                thickness: thickness.len(),
                density: density.len(),
                roughness: roughness.len(),
            });
        }
        Ok(thickness.iter().chain(density).chain(roughness).copied().collect())
    }

    /// Split `θ` into a validated [`LayerStack`].
    ///
    /// # Errors
    /// - `ModelError::ParameterCountMismatch` if `θ` has the wrong length.
    /// - Validation errors of [`LayerStack::new`].
    pub fn stack(&self, theta: &Theta) -> ModelResult<LayerStack> {
        if theta.len() != self.parameter_count() {
            return Err(ModelError::ParameterCountMismatch {
                expected: self.parameter_count(),
                found: theta.len(),
            });
        }
        let n = self.layers;
        let slice = |from: usize, to: usize| theta.slice(ndarray::s![from..to]).to_owned();
        LayerStack::new(slice(0, n), slice(n, 2 * n + 2), slice(2 * n + 2, 3 * n + 3))
    }
}

/// Measured reflectivity, with optional one-sigma uncertainties.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectivityData {
    q: Array1<f64>,
    observed: Array1<f64>,
    uncertainty: Option<Array1<f64>>,
}

impl ReflectivityData {
    /// # Errors
    /// - `ModelError::DataLengthMismatch` if the columns differ in length.
    /// - `ModelError::InvalidMomentumTransfer` for non-finite `q`.
    /// - `ModelError::InvalidObservation` for non-finite observations or
    ///   uncertainties that are not finite and `> 0`.
    pub fn new(
        q: Array1<f64>, observed: Array1<f64>, uncertainty: Option<Array1<f64>>,
    ) -> ModelResult<Self> {
        if observed.len() != q.len() {
            return Err(ModelError::DataLengthMismatch { expected: q.len(), found: observed.len() });
        }
        if let Some((index, &value)) = q.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidMomentumTransfer { index, value });
        }
        if let Some((index, &value)) = observed.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidObservation {
                index,
                value,
                reason: "Observed reflectivity must be finite.",
            });
        }
        if let Some(err) = &uncertainty {
            if err.len() != q.len() {
                return Err(ModelError::DataLengthMismatch { expected: q.len(), found: err.len() });
            }
            if let Some((index, &value)) =
                err.iter().enumerate().find(|(_, v)| !(v.is_finite() && **v > 0.0))
            {
                return Err(ModelError::InvalidObservation {
                    index,
                    value,
                    reason: "Uncertainties must be finite and > 0.",
                });
            }
        }
        Ok(Self { q, observed, uncertainty })
    }

    /// Data sampled from a model curve, without uncertainties.
    pub fn from_curve(curve: &ReflectivityCurve) -> Self {
        Self { q: curve.q().clone(), observed: curve.intensity().clone(), uncertainty: None }
    }

    pub fn q(&self) -> &Array1<f64> {
        &self.q
    }

    pub fn observed(&self) -> &Array1<f64> {
        &self.observed
    }

    pub fn uncertainty(&self) -> Option<&Array1<f64>> {
        self.uncertainty.as_ref()
    }
}

/// Residual norm between model and observed reflectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residual {
    /// `Σ (R_model - R_obs)²`
    SquaredError,
    /// `Σ (ln R_model - ln R_obs)²`; weights every decade equally.
    LogSquaredError,
    /// `Σ ((R_model - R_obs) / δR)²`
    ChiSquared,
}

impl Residual {
    fn check(self, data: &ReflectivityData) -> ModelResult<()> {
        match self {
            Residual::SquaredError => Ok(()),
            Residual::LogSquaredError => {
                match data.observed.iter().enumerate().find(|(_, v)| **v <= 0.0) {
                    Some((index, &value)) => Err(ModelError::InvalidObservation {
                        index,
                        value,
                        reason: "Log residual needs strictly positive observations.",
                    }),
                    None => Ok(()),
                }
            }
            Residual::ChiSquared => match data.uncertainty {
                Some(_) => Ok(()),
                None => Err(ModelError::MissingUncertainty),
            },
        }
    }

    /// Cost of `model` against `data`; lengths must already agree.
    pub fn cost(self, model: ArrayView1<'_, f64>, data: &ReflectivityData) -> Cost {
        let observed = data.observed.iter();
        match self {
            Residual::SquaredError => {
                model.iter().zip(observed).map(|(m, o)| (m - o).powi(2)).sum()
            }
            Residual::LogSquaredError => model
                .iter()
                .zip(observed)
                .map(|(m, o)| (m.max(f64::MIN_POSITIVE).ln() - o.ln()).powi(2))
                .sum(),
            Residual::ChiSquared => match &data.uncertainty {
                Some(err) => model
                    .iter()
                    .zip(observed)
                    .zip(err.iter())
                    .map(|((m, o), e)| ((m - o) / e).powi(2))
                    .sum(),
                None => f64::NAN,
            },
        }
    }
}

/// ReflectivityObjective — layer-model fitting cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectivityObjective {
    layout: LayerLayout,
    data: ReflectivityData,
    residual: Residual,
    step: f64,
    smoothing: f64,
    options: ReflectivityOptions,
}

impl ReflectivityObjective {
    /// Objective for `layout` against `data`, sampling profiles every `step`.
    ///
    /// # Errors
    /// - `ModelError::InvalidStep` unless `step` is finite and `> 0`.
    /// - `ModelError::InvalidObservation` / `ModelError::MissingUncertainty`
    ///   if `data` cannot be used with `residual`.
    pub fn new(
        layout: LayerLayout, data: ReflectivityData, residual: Residual, step: f64,
        options: ReflectivityOptions,
    ) -> ModelResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ModelError::InvalidStep {
                value: step,
                reason: "Sampling step must be finite and > 0.",
            });
        }
        residual.check(&data)?;
        Ok(Self { layout, data, residual, step, smoothing: 0.0, options })
    }

    /// Additionally convolve every profile with a Gaussian of width `sigma`.
    ///
    /// # Errors
    /// - `ModelError::InvalidRoughness` if `sigma` is negative or non-finite.
    pub fn with_smoothing(mut self, sigma: f64) -> ModelResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(ModelError::InvalidRoughness {
                value: sigma,
                reason: "Smoothing width must be finite and non-negative.",
            });
        }
        self.smoothing = sigma;
        Ok(self)
    }

    pub fn layout(&self) -> &LayerLayout {
        &self.layout
    }

    pub fn data(&self) -> &ReflectivityData {
        &self.data
    }

    /// Model reflectivity for `theta` at the data's momentum transfers.
    ///
    /// # Errors
    /// Any forward-model error for this parameter vector.
    pub fn model_curve(&self, theta: &Theta) -> ModelResult<ReflectivityCurve> {
        let stack = self.layout.stack(theta)?;
        let mut profile = build_density_profile(&stack, self.step)?;
        if self.smoothing > 0.0 {
            profile = convolve_roughness(&profile, self.smoothing)?;
        }
        reflectivity_from_profile(&self.data.q, &profile, &self.options)
    }
}

impl Objective for ReflectivityObjective {
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        let curve = self.model_curve(theta)?;
        Ok(self.residual.cost(curve.intensity().view(), &self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter layout packing and splitting.
    // - Data and residual validation.
    // - The objective's minimum at the parameters that generated the data.
    // -------------------------------------------------------------------------

    fn q_axis() -> Array1<f64> {
        Array1::linspace(0.01, 0.2, 40)
    }

    fn truth(layout: &LayerLayout) -> Theta {
        layout.pack(&[50.0], &[0.0, 4e-6, 2e-6], &[3.0, 2.0]).unwrap()
    }

    fn synthetic(layout: LayerLayout, residual: Residual) -> ReflectivityObjective {
        let probe = ReflectivityObjective::new(
            layout,
            ReflectivityData::new(q_axis(), Array1::ones(40), None).unwrap(),
            Residual::SquaredError,
            1.0,
            ReflectivityOptions::default(),
        )
        .unwrap();
        let curve = probe.model_curve(&truth(&layout)).unwrap();
        ReflectivityObjective::new(
            layout,
            ReflectivityData::from_curve(&curve),
            residual,
            1.0,
            ReflectivityOptions::default(),
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Packing and splitting are inverse on the `3n + 3` layout.
    //
    // Given
    // -----
    // - One layer: thickness 50, densities `[0, 4e-6, 2e-6]`, roughness
    //   `[3, 2]`.
    //
    // Expect
    // ------
    // - Six parameters; the stack recovers each group.
    // - A five-element vector is rejected with `ParameterCountMismatch`.
    fn layout_packs_and_splits() {
        let layout = LayerLayout::new(1);

        let theta = truth(&layout);
        let stack = layout.stack(&theta).unwrap();

        assert_eq!(layout.parameter_count(), 6);
        assert_eq!(stack.thickness(), &array![50.0]);
        assert_eq!(stack.density(), &array![0.0, 4e-6, 2e-6]);
        assert_eq!(stack.roughness(), &array![3.0, 2.0]);
        assert_eq!(
            layout.stack(&Array1::zeros(5)).unwrap_err(),
            ModelError::ParameterCountMismatch { expected: 6, found: 5 }
        );
    }

    #[test]
    fn data_and_residual_are_validated() {
        assert!(matches!(
            ReflectivityData::new(array![0.1, 0.2], array![1.0], None).unwrap_err(),
            ModelError::DataLengthMismatch { expected: 2, found: 1 }
        ));
        assert!(ReflectivityData::new(array![0.1], array![1.0], Some(array![0.0])).is_err());

        let data = ReflectivityData::new(array![0.1, 0.2], array![1.0, 0.0], None).unwrap();
        let opts = ReflectivityOptions::default();
        let log = ReflectivityObjective::new(
            LayerLayout::new(0),
            data.clone(),
            Residual::LogSquaredError,
            1.0,
            opts,
        );
        assert!(matches!(log.unwrap_err(), ModelError::InvalidObservation { index: 1, .. }));
        let chi =
            ReflectivityObjective::new(LayerLayout::new(0), data, Residual::ChiSquared, 1.0, opts);
        assert_eq!(chi.unwrap_err(), ModelError::MissingUncertainty);
    }

    #[test]
    // Purpose
    // -------
    // The cost vanishes at the generating parameters and grows away from
    // them for every residual.
    //
    // Given
    // -----
    // - Synthetic data from a single 50 Å layer.
    //
    // Expect
    // ------
    // - Cost 0 at the truth; positive at a 5 Å thicker layer.
    fn cost_is_minimal_at_generating_parameters() {
        let layout = LayerLayout::new(1);
        for residual in [Residual::SquaredError, Residual::LogSquaredError] {
            let objective = synthetic(layout, residual);
            let mut off = truth(&layout);
            off[0] = 55.0;

            assert_eq!(objective.value(&truth(&layout)).unwrap(), 0.0);
            assert!(objective.value(&off).unwrap() > 0.0, "{residual:?}");
        }
    }

    #[test]
    fn chi_squared_weights_by_uncertainty() {
        let data =
            ReflectivityData::new(array![0.1, 0.2], array![1.0, 2.0], Some(array![0.5, 2.0]))
                .unwrap();

        let cost = Residual::ChiSquared.cost(array![2.0, 4.0].view(), &data);

        assert_eq!(cost, 4.0 + 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Forward-model failures inside the objective surface as `OptError::Model`.
    //
    // Given
    // -----
    // - A parameter vector with a negative thickness.
    //
    // Expect
    // ------
    // - `Err(OptError::Model(ModelError::InvalidThickness { .. }))`.
    fn model_errors_become_opt_errors() {
        let layout = LayerLayout::new(1);
        let objective = synthetic(layout, Residual::SquaredError);
        let mut bad = truth(&layout);
        bad[0] = -1.0;

        let err = objective.value(&bad).unwrap_err();

        assert!(matches!(err, OptError::Model(ModelError::InvalidThickness { .. })));
    }

    #[test]
    fn smoothing_changes_the_model() {
        let layout = LayerLayout::new(1);
        let objective = synthetic(layout, Residual::SquaredError);
        let smoothed = objective.clone().with_smoothing(4.0).unwrap();

        assert!(smoothed.value(&truth(&layout)).unwrap() > 0.0);
        assert!(objective.with_smoothing(-1.0).is_err());
    }
}
