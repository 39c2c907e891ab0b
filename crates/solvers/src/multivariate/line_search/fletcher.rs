use descent_core::Objective;
use nalgebra::DVector;
use thiserror::Error;
use tracing::{debug, trace};

use crate::multivariate::{Error, evaluate};

use super::LineSearch;

/// Fletcher's inexact line search.
///
/// Brackets an acceptable step between a lower point `aL` and an upper point
/// `aU`. A trial step that fails the sufficient-decrease test
/// `f(a) ≤ f(aL) + ρ(a − aL)f'(aL)` becomes the new upper point and is
/// replaced by a safeguarded quadratic interpolation. A trial step whose slope
/// is still too steep, `f'(a) < σf'(aL)`, becomes the new lower point and is
/// extrapolated from. Any other trial step is accepted.
///
/// The first trial step of a session is `1/‖d‖`. Later trial steps use
/// Fletcher's estimate `2(f_k − f_{k−1})/f'(0)` from the previous call. Both
/// are reset to 1 if they fall outside `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fletcher {
    rho: f64,
    sigma: f64,
    tau: f64,
    chi: f64,
    max_evaluations: usize,
    previous_value: Option<f64>,
}

/// Errors that can occur when validating Fletcher line search parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FletcherError {
    #[error("rho must lie in (0, 0.5)")]
    Rho,

    #[error("sigma must lie in [rho, 1)")]
    Sigma,

    #[error("tau must lie in (0, 0.5)")]
    Tau,

    #[error("chi must be greater than 1")]
    Chi,
}

/// Upper point used before any trial step has failed.
const UNBOUNDED: f64 = 1e99;

impl Default for Fletcher {
    fn default() -> Self {
        Self {
            rho: 0.1,
            sigma: 0.1,
            tau: 0.1,
            chi: 9.0,
            max_evaluations: 100,
            previous_value: None,
        }
    }
}

impl Fletcher {
    /// Creates a line search with validated parameters.
    ///
    /// - `rho` — sufficient-decrease factor
    /// - `sigma` — slope-reduction factor
    /// - `tau` — how close interpolated steps may come to the bracket ends
    /// - `chi` — how far extrapolated steps may reach
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn new(rho: f64, sigma: f64, tau: f64, chi: f64) -> Result<Self, FletcherError> {
        if !(rho > 0.0 && rho < 0.5) {
            return Err(FletcherError::Rho);
        }
        if !(sigma >= rho && sigma < 1.0) {
            return Err(FletcherError::Sigma);
        }
        if !(tau > 0.0 && tau < 0.5) {
            return Err(FletcherError::Tau);
        }
        if !(chi > 1.0 && chi.is_finite()) {
            return Err(FletcherError::Chi);
        }

        Ok(Self {
            rho,
            sigma,
            tau,
            chi,
            ..Self::default()
        })
    }

    /// Sets the maximum number of trial steps evaluated per search.
    #[must_use]
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    fn initial_step(&self, value: f64, slope: f64, direction: &DVector<f64>) -> f64 {
        let step = match self.previous_value {
            Some(previous) => 2.0 * (value - previous) / slope,
            None => 1.0 / direction.norm(),
        };
        if step > 0.0 && step <= 1.0 { step } else { 1.0 }
    }
}

impl<P: Objective> LineSearch<P> for Fletcher {
    fn search(
        &mut self,
        problem: &P,
        x: &DVector<f64>,
        direction: &DVector<f64>,
    ) -> Result<f64, Error> {
        let mut slope_lower = evaluate::gradient(problem, x)?.dot(direction);
        if !(slope_lower < 0.0) {
            debug!(slope = slope_lower, "not a descent direction, taking a zero step");
            return Ok(0.0);
        }

        let mut value_lower = evaluate::value(problem, x)?;
        let mut step = self.initial_step(value_lower, slope_lower, direction);
        self.previous_value = Some(value_lower);

        let mut lower = 0.0;
        let mut upper = UNBOUNDED;

        for _ in 0..self.max_evaluations {
            let trial = x + direction * step;
            let value = evaluate::value(problem, &trial)?;

            if value > value_lower + self.rho * (step - lower) * slope_lower {
                // Interpolate toward the lower point.
                upper = upper.min(step);
                let span = step - lower;
                let estimate = lower
                    + span * span * slope_lower
                        / (2.0 * (value_lower - value + span * slope_lower));
                let margin = self.tau * (upper - lower);
                step = estimate.max(lower + margin).min(upper - margin);
                trace!(step, "interpolated");
                continue;
            }

            let slope = evaluate::gradient(problem, &trial)?.dot(direction);
            if slope < self.sigma * slope_lower {
                // Extrapolate beyond the trial step.
                let span = step - lower;
                let delta = (span * slope / (slope_lower - slope))
                    .max(self.tau * span)
                    .min(self.chi * span);
                lower = step;
                step += delta;
                value_lower = value;
                slope_lower = slope;
                trace!(step, "extrapolated");
                continue;
            }

            return Ok(step);
        }

        debug!(
            step,
            max_evaluations = self.max_evaluations,
            "line search evaluation budget exhausted"
        );
        Ok(step)
    }
}
