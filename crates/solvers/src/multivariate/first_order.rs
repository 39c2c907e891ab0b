//! Gradient descent.
//!
//! The direction is always `−g(x_k)`. The step length comes either from the
//! session's line search or from an analytic estimate. The analytic estimate
//! fits a parabola along the gradient through `f(x_k)`, its slope `−g'g`, and
//! one extra evaluation at `x_k − a·g`:
//!
//! ```text
//! a_new = g'g·a² / (2·(f(x_k − a·g) − f(x_k) + a·g'g))
//! ```
//!
//! If the fit is not convex (a non-positive or non-finite estimate), that
//! iteration falls back to the line search.

use descent_core::Objective;
use nalgebra::DVector;
use tracing::debug;

use super::{
    Error, evaluate,
    direction::{Context, Direction, Proposal},
};

/// How [`FirstOrder`] picks its step length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepRule {
    /// Delegate to the session's line search.
    #[default]
    LineSearch,

    /// Use the running analytic estimate.
    Analytic,
}

/// Negative-gradient direction strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstOrder {
    rule: StepRule,
}

impl FirstOrder {
    /// Gradient descent with the session's line search.
    #[must_use]
    pub fn line_search() -> Self {
        Self {
            rule: StepRule::LineSearch,
        }
    }

    /// Gradient descent with the analytic step estimate.
    #[must_use]
    pub fn analytic() -> Self {
        Self {
            rule: StepRule::Analytic,
        }
    }

    #[must_use]
    pub fn rule(&self) -> StepRule {
        self.rule
    }
}

impl<P: Objective> Direction<P> for FirstOrder {
    /// Running analytic step estimate.
    type State = f64;

    fn init(&self, _x0: &DVector<f64>) -> Self::State {
        1.0
    }

    fn propose(&self, step: &mut f64, context: Context<'_, P>) -> Result<Proposal, Error> {
        let gradient = evaluate::gradient(context.problem, context.x)?;
        let direction = -&gradient;

        if self.rule == StepRule::LineSearch {
            return Ok(Proposal::LineSearch(direction));
        }

        let gg = gradient.norm_squared();
        if gg == 0.0 {
            return Ok(Proposal::Fixed {
                direction,
                step: *step,
            });
        }

        let value = evaluate::value(context.problem, context.x)?;
        let probe = context.x + &direction * *step;
        let probe_value = evaluate::value(context.problem, &probe)?;

        let estimate = gg * *step * *step / (2.0 * (probe_value - value + *step * gg));
        if estimate.is_finite() && estimate > 0.0 {
            *step = estimate;
            Ok(Proposal::Fixed {
                direction,
                step: estimate,
            })
        } else {
            debug!(estimate, "analytic step rejected, using line search");
            Ok(Proposal::LineSearch(direction))
        }
    }

    fn accept(&self, step: &mut f64, accepted: f64) {
        if accepted > 0.0 {
            *step = accepted;
        }
    }
}
