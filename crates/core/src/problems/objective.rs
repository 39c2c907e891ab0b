use nalgebra::{DMatrix, DVector};

/// A smooth scalar objective over n-dimensional real vectors.
///
/// Implementations may be analytic or numerically approximated; solvers only
/// require that repeated calls with the same `x` return the same result.
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be evaluated at `x`.
    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error>;

    /// Evaluates the gradient `g(x)`, an n-vector.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be evaluated at `x`.
    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error>;
}

/// An [`Objective`] that also provides its Hessian.
pub trait TwiceDifferentiable: Objective {
    /// Evaluates the Hessian `H(x)`, a symmetric n×n matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Hessian cannot be evaluated at `x`.
    fn hessian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error>;
}

impl<T: Objective + ?Sized> Objective for &T {
    type Error = T::Error;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        (**self).value(x)
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        (**self).gradient(x)
    }
}

impl<T: TwiceDifferentiable + ?Sized> TwiceDifferentiable for &T {
    fn hessian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        (**self).hessian(x)
    }
}
