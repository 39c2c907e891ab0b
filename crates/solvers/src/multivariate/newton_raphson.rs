//! Newton-Raphson directions from the exact Hessian.
//!
//! The direction is `−H(x_k)⁻¹·g(x_k)`. When the Hessian cannot be inverted,
//! its eigenvalues are floored to make it positive-definite and the corrected
//! matrix is inverted instead. If that also fails the identity is used, which
//! reduces the step to gradient descent.

use descent_core::TwiceDifferentiable;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::linalg;

use super::{
    Error, evaluate,
    direction::{Context, Direction, Proposal},
};

/// Newton-Raphson direction strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRaphson {
    eigen_floor: f64,
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self { eigen_floor: 1e-8 }
    }
}

impl NewtonRaphson {
    /// Creates a strategy whose positive-definite correction floors each
    /// eigenvalue at `eigen_floor · max(1, max|λ|)`.
    #[must_use]
    pub fn new(eigen_floor: f64) -> Self {
        Self { eigen_floor }
    }

    /// Returns `H⁻¹`, or the best available substitute.
    fn inverse_hessian(&self, hessian: &DMatrix<f64>) -> DMatrix<f64> {
        if let Some(inverse) = linalg::inverse(hessian) {
            return inverse;
        }

        debug!("Hessian is singular, applying positive-definite correction");
        if let Some(inverse) =
            linalg::positive_definite(hessian, self.eigen_floor).and_then(|m| linalg::inverse(&m))
        {
            return inverse;
        }

        debug!("corrected Hessian is singular, falling back to the identity");
        DMatrix::identity(hessian.nrows(), hessian.ncols())
    }
}

impl<P: TwiceDifferentiable> Direction<P> for NewtonRaphson {
    type State = ();

    fn init(&self, _x0: &DVector<f64>) -> Self::State {}

    fn propose(&self, _state: &mut (), context: Context<'_, P>) -> Result<Proposal, Error> {
        let gradient = evaluate::gradient(context.problem, context.x)?;
        let hessian = evaluate::hessian(context.problem, context.x)?;
        let direction = -(self.inverse_hessian(&hessian) * gradient);
        Ok(Proposal::LineSearch(direction))
    }
}
