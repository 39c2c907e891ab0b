//! Step-length selection along a descent direction.

mod exact;
mod fletcher;

pub use exact::Exact;
pub use fletcher::{Fletcher, FletcherError};

use descent_core::{Objective, UnivariateFunction};
use nalgebra::DVector;

use super::Error;

/// Chooses a step length along a direction.
///
/// Each session owns its own line search, cloned from the solver, so
/// implementations may keep memory between calls (for example the previous
/// objective value).
pub trait LineSearch<P: Objective> {
    /// Returns a non-negative step length `a` for moving from `x` to `x + a·d`.
    ///
    /// A step of zero means no decrease was found along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if an evaluator fails.
    fn search(
        &mut self,
        problem: &P,
        x: &DVector<f64>,
        direction: &DVector<f64>,
    ) -> Result<f64, Error>;
}

/// The objective restricted to the ray `t ↦ f(x + t·d)`.
#[derive(Debug)]
pub struct Ray<'a, P> {
    problem: &'a P,
    origin: &'a DVector<f64>,
    direction: &'a DVector<f64>,
}

impl<'a, P> Ray<'a, P> {
    #[must_use]
    pub fn new(problem: &'a P, origin: &'a DVector<f64>, direction: &'a DVector<f64>) -> Self {
        Self {
            problem,
            origin,
            direction,
        }
    }

    /// Returns the point `x + t·d`.
    #[must_use]
    pub fn point(&self, t: f64) -> DVector<f64> {
        self.origin + self.direction * t
    }
}

impl<P: Objective> UnivariateFunction for Ray<'_, P> {
    type Error = P::Error;

    fn value(&self, t: f64) -> Result<f64, Self::Error> {
        self.problem.value(&self.point(t))
    }
}
