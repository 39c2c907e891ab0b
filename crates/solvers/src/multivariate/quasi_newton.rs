//! Quasi-Newton directions from a running inverse-Hessian approximation.
//!
//! The approximation `S` starts as the identity. Before each new direction the
//! gradient change `γ = g_k − g_{k−1}` and the last increment `δ = Δx` refresh
//! `S` through a [`HessianUpdate`], and the direction is `d = −S·g_k`.
//!
//! When `‖γ‖ ≤ epsilon` the gradient has stalled: the update is skipped, the
//! previous direction is reused, and a small fixed step replaces the line
//! search.
//!
//! Every update rejects a curvature denominator `a'b` with
//! `|a'b| ≤ f64::EPSILON·‖a‖·‖b‖` (or a non-finite one) by returning
//! [`CurvatureError`], which ends the search with
//! [`Error::DegenerateCurvature`](super::Error::DegenerateCurvature).

mod bfgs;
mod dfp;
mod huang;
mod mccormick;
mod rank_one;

pub use bfgs::{Bfgs, damped_update};
pub use dfp::Dfp;
pub use huang::Huang;
pub use mccormick::McCormick;
pub use rank_one::RankOne;

use descent_core::Objective;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use super::{
    Error, evaluate,
    direction::{Context, Direction, Proposal},
};

/// Step length used instead of a line search when the gradient has stalled.
pub const STALLED_STEP: f64 = 1e-5;

/// A rule for refreshing the inverse-Hessian approximation.
pub trait HessianUpdate {
    /// Returns the updated approximation from `s`, the gradient change
    /// `gamma`, and the increment `delta` that produced it.
    ///
    /// # Errors
    ///
    /// Returns [`CurvatureError`] if a denominator of the formula is too
    /// close to zero.
    fn update(
        &self,
        s: &DMatrix<f64>,
        gamma: &DVector<f64>,
        delta: &DVector<f64>,
    ) -> Result<DMatrix<f64>, CurvatureError>;
}

/// A curvature denominator was too close to zero for a stable update.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("degenerate curvature: update denominator {denominator:e} is too close to zero")]
pub struct CurvatureError {
    pub denominator: f64,
}

/// Returns `a'b`, rejecting values that are negligible relative to `‖a‖‖b‖`.
pub(crate) fn curvature(a: &DVector<f64>, b: &DVector<f64>) -> Result<f64, CurvatureError> {
    let denominator = a.dot(b);
    if !denominator.is_finite() || denominator.abs() <= f64::EPSILON * a.norm() * b.norm() {
        return Err(CurvatureError { denominator });
    }
    Ok(denominator)
}

/// Quasi-Newton direction strategy parameterized by its update rule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuasiNewton<U> {
    update: U,
}

impl<U: HessianUpdate> QuasiNewton<U> {
    #[must_use]
    pub fn new(update: U) -> Self {
        Self { update }
    }

    /// Returns the update rule.
    #[must_use]
    pub fn update_rule(&self) -> &U {
        &self.update
    }
}

/// Running state of a quasi-Newton session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuasiNewtonState {
    /// The inverse-Hessian approximation `S_k`.
    pub inverse_hessian: DMatrix<f64>,
    previous_gradient: Option<DVector<f64>>,
    previous_direction: Option<DVector<f64>>,
}

impl<P, U> Direction<P> for QuasiNewton<U>
where
    P: Objective,
    U: HessianUpdate,
{
    type State = QuasiNewtonState;

    fn init(&self, x0: &DVector<f64>) -> Self::State {
        let n = x0.len();
        QuasiNewtonState {
            inverse_hessian: DMatrix::identity(n, n),
            previous_gradient: None,
            previous_direction: None,
        }
    }

    fn propose(&self, state: &mut Self::State, context: Context<'_, P>) -> Result<Proposal, Error> {
        let gradient = evaluate::gradient(context.problem, context.x)?;

        if let (Some(previous_gradient), Some(previous_direction)) =
            (&state.previous_gradient, &state.previous_direction)
        {
            let gamma = &gradient - previous_gradient;
            if gamma.norm() <= context.config.epsilon() {
                debug!(
                    gradient_change = gamma.norm(),
                    "gradient stalled, reusing previous direction"
                );
                let direction = previous_direction.clone();
                state.previous_gradient = Some(gradient);
                return Ok(Proposal::Fixed {
                    direction,
                    step: STALLED_STEP,
                });
            }

            if let Some(delta) = context.last_increment {
                state.inverse_hessian = self.update.update(&state.inverse_hessian, &gamma, delta)?;
            }
        }

        let direction = -(&state.inverse_hessian * &gradient);
        state.previous_gradient = Some(gradient);
        state.previous_direction = Some(direction.clone());
        Ok(Proposal::LineSearch(direction))
    }
}
