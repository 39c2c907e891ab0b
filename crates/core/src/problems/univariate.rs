use std::convert::Infallible;

/// A scalar function of one real variable.
///
/// Every `Fn(f64) -> f64` closure implements this trait with
/// [`Infallible`] as its error type.
pub trait UnivariateFunction {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the function cannot be evaluated at `x`.
    fn value(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<F> UnivariateFunction for F
where
    F: Fn(f64) -> f64,
{
    type Error = Infallible;

    fn value(&self, x: f64) -> Result<f64, Self::Error> {
        Ok(self(x))
    }
}
