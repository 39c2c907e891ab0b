use descent_core::{Objective, TwiceDifferentiable};
use nalgebra::{DMatrix, DVector};

use super::Error;

/// Evaluates `f(x)`.
pub(super) fn value<P: Objective>(problem: &P, x: &DVector<f64>) -> Result<f64, Error> {
    problem.value(x).map_err(Error::objective)
}

/// Evaluates `g(x)` and checks its length.
pub(super) fn gradient<P: Objective>(problem: &P, x: &DVector<f64>) -> Result<DVector<f64>, Error> {
    let g = problem.gradient(x).map_err(Error::objective)?;
    Error::check_len("gradient", x.len(), g.len())?;
    Ok(g)
}

/// Evaluates `H(x)` and checks that it is n×n.
pub(super) fn hessian<P: TwiceDifferentiable>(
    problem: &P,
    x: &DVector<f64>,
) -> Result<DMatrix<f64>, Error> {
    let h = problem.hessian(x).map_err(Error::objective)?;
    Error::check_len("hessian rows", x.len(), h.nrows())?;
    Error::check_len("hessian columns", x.len(), h.ncols())?;
    Ok(h)
}
