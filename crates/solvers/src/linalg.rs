//! Dense matrix helpers used by the Newton-type direction strategies.

use nalgebra::{DMatrix, SymmetricEigen};

/// Iteration cap for the symmetric eigen-decomposition.
const EIGEN_MAX_ITERS: usize = 1000;

/// Returns the inverse of `m`, or `None` if it is singular.
///
/// An inverse containing non-finite entries is treated as a failure, which
/// catches matrices that are singular to working precision.
///
/// # Panics
///
/// Panics if `m` is not square.
#[must_use]
pub fn inverse(m: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let inv = m.clone().try_inverse()?;
    is_finite(&inv).then_some(inv)
}

/// Corrects a symmetric matrix into a positive-definite one.
///
/// The matrix is symmetrized and decomposed as `QΛQ'`. Each eigenvalue is
/// replaced by `max(|λ|, tolerance · max(1, max|λ|))` and the matrix is
/// recomposed, so negative curvature is flipped and near-zero curvature is
/// floored relative to the largest eigenvalue.
///
/// Returns `None` if `m` contains non-finite entries or the decomposition
/// does not converge.
#[must_use]
pub fn positive_definite(m: &DMatrix<f64>, tolerance: f64) -> Option<DMatrix<f64>> {
    if !is_finite(m) {
        return None;
    }

    let symmetric = (m + m.transpose()) * 0.5;
    let mut eigen = SymmetricEigen::try_new(symmetric, f64::EPSILON, EIGEN_MAX_ITERS)?;

    let scale = eigen
        .eigenvalues
        .iter()
        .fold(1.0_f64, |acc, lambda| acc.max(lambda.abs()));
    let floor = tolerance * scale;
    eigen.eigenvalues.apply(|lambda| *lambda = lambda.abs().max(floor));

    Some(eigen.recompose())
}

/// Matthews–Davies modified LDL' factorization.
///
/// Factors `m` as `LDL'`, replacing every non-positive pivot with the
/// smallest positive pivot seen so far (or 1 if there is none yet), and
/// returns the recomposed positive-definite matrix. A positive-definite
/// input is returned unchanged up to rounding.
///
/// # Panics
///
/// Panics if `m` is not square.
#[must_use]
pub fn matthews_davies(m: &DMatrix<f64>) -> DMatrix<f64> {
    assert!(m.is_square(), "Matthews-Davies requires a square matrix");

    let n = m.nrows();
    if n == 0 {
        return m.clone();
    }

    let mut h = m.clone();
    let mut l = DMatrix::<f64>::zeros(n, n);
    let mut smallest_pivot = if h[(0, 0)] > 0.0 { h[(0, 0)] } else { 1.0 };

    for k in 1..n {
        let p = k - 1;
        l[(p, p)] = 1.0;
        if h[(p, p)] <= 0.0 {
            h[(p, p)] = smallest_pivot;
        }

        for i in k..n {
            l[(i, p)] = h[(i, p)] / h[(p, p)];
            h[(i, p)] = 0.0;
            for j in k..n {
                h[(i, j)] -= l[(i, p)] * h[(p, j)];
            }
        }

        if h[(p, p)] > 0.0 && h[(p, p)] < smallest_pivot {
            smallest_pivot = h[(p, p)];
        }
    }

    l[(n - 1, n - 1)] = 1.0;
    if h[(n - 1, n - 1)] <= 0.0 {
        h[(n - 1, n - 1)] = smallest_pivot;
    }

    let d = DMatrix::from_diagonal(&h.diagonal());
    &l * d * l.transpose()
}

fn is_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|v| v.is_finite())
}
