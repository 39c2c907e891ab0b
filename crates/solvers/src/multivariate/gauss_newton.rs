//! Gauss-Newton directions for sums of squares.
//!
//! For `F(x) = r(x)'r(x)` the Hessian is approximated by `2J'J`, corrected
//! with a Matthews–Davies factorization so rank-deficient Jacobians still give
//! a descent direction, and the direction is `−(2J'J)⁻¹·g` with `g = 2J'r`.
//! Only residuals and the Jacobian are required; see [`SumOfSquares`].

use descent_core::{LeastSquaresProblem, SumOfSquares};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::linalg;

use super::{
    Error,
    direction::{Context, Direction, Proposal},
};

/// Gauss-Newton direction strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussNewton;

impl<P: LeastSquaresProblem> Direction<SumOfSquares<P>> for GaussNewton {
    type State = ();

    fn init(&self, _x0: &DVector<f64>) -> Self::State {}

    fn propose(
        &self,
        _state: &mut (),
        context: Context<'_, SumOfSquares<P>>,
    ) -> Result<Proposal, Error> {
        let SumOfSquares(problem) = context.problem;
        let x = context.x;

        let residuals = problem.residuals(x).map_err(Error::objective)?;
        let jacobian = problem.jacobian(x).map_err(Error::objective)?;
        Error::check_len("jacobian rows", residuals.len(), jacobian.nrows())?;
        Error::check_len("jacobian columns", x.len(), jacobian.ncols())?;

        let gradient = jacobian.tr_mul(&residuals) * 2.0;
        let hessian = linalg::matthews_davies(&(jacobian.tr_mul(&jacobian) * 2.0));
        let inverse = linalg::inverse(&hessian).unwrap_or_else(|| {
            debug!("Gauss-Newton Hessian is singular, falling back to the identity");
            DMatrix::identity(x.len(), x.len())
        });

        Ok(Proposal::LineSearch(-(inverse * gradient)))
    }
}
