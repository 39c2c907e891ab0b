use nalgebra::{DMatrix, DVector};

use super::Objective;

/// A residual vector function `r: Rⁿ → Rᵘ` with its Jacobian.
///
/// Minimized through [`SumOfSquares`], which exposes `F(x) = r(x)'r(x)` as an
/// [`Objective`].
pub trait LeastSquaresProblem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the residual vector `r(x)`, a u-vector.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be evaluated at `x`.
    fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error>;

    /// Evaluates the Jacobian `J(x)`, a u×n matrix with `J[i][j] = ∂rᵢ/∂xⱼ`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Jacobian cannot be evaluated at `x`.
    fn jacobian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error>;
}

/// Adapter that turns a [`LeastSquaresProblem`] into an [`Objective`].
///
/// The objective is `F(x) = r'r` and its gradient is `g(x) = 2J'r`, both
/// derived mechanically from the residuals and Jacobian.
#[derive(Debug, Clone, Copy)]
pub struct SumOfSquares<P>(pub P);

impl<P: LeastSquaresProblem> Objective for SumOfSquares<P> {
    type Error = P::Error;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        let r = self.0.residuals(x)?;
        Ok(r.norm_squared())
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        let r = self.0.residuals(x)?;
        let j = self.0.jacobian(x)?;
        Ok(j.tr_mul(&r) * 2.0)
    }
}
