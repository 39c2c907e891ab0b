//! Classic minimization benchmarks with analytic derivatives.

use std::convert::Infallible;

use descent_core::{LeastSquaresProblem, Objective, TwiceDifferentiable};
use nalgebra::{DMatrix, DVector, dmatrix, dvector};

/// Himmelblau's function `(x² + y − 11)² + (x + y² − 7)²`.
///
/// Has four minima with value zero, including one at `(3, 2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Himmelblau;

impl Himmelblau {
    fn terms(x: &DVector<f64>) -> (f64, f64) {
        (x[0] * x[0] + x[1] - 11.0, x[0] + x[1] * x[1] - 7.0)
    }
}

impl Objective for Himmelblau {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        let (a, b) = Self::terms(x);
        Ok(a * a + b * b)
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        let (a, b) = Self::terms(x);
        Ok(dvector![
            4.0 * x[0] * a + 2.0 * b,
            2.0 * a + 4.0 * x[1] * b
        ])
    }
}

impl TwiceDifferentiable for Himmelblau {
    fn hessian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        let cross = 4.0 * (x[0] + x[1]);
        Ok(dmatrix![
            12.0 * x[0] * x[0] + 4.0 * x[1] - 42.0, cross;
            cross, 4.0 * x[0] + 12.0 * x[1] * x[1] - 26.0
        ])
    }
}

/// A four-variable valley with quartic walls, minimized at the origin.
///
/// ```text
/// f(x) = (x1 − 4x2)⁴ + 12(x3 − x4)⁴ + 3(x2 − 10x3)² + 55(x1 − 2x4)²
/// ```
///
/// The Hessian vanishes in two directions at the minimum, so Newton-type
/// methods converge only linearly there.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarticValley;

struct ValleyTerms {
    a: f64,
    b: f64,
    c: f64,
    e: f64,
}

impl ValleyTerms {
    fn at(x: &DVector<f64>) -> Self {
        Self {
            a: x[0] - 4.0 * x[1],
            b: x[2] - x[3],
            c: x[1] - 10.0 * x[2],
            e: x[0] - 2.0 * x[3],
        }
    }
}

impl Objective for QuarticValley {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        let ValleyTerms { a, b, c, e } = ValleyTerms::at(x);
        Ok(a.powi(4) + 12.0 * b.powi(4) + 3.0 * c * c + 55.0 * e * e)
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        let ValleyTerms { a, b, c, e } = ValleyTerms::at(x);
        let a3 = a.powi(3);
        let b3 = b.powi(3);
        Ok(dvector![
            4.0 * a3 + 110.0 * e,
            -16.0 * a3 + 6.0 * c,
            48.0 * b3 - 60.0 * c,
            -48.0 * b3 - 220.0 * e
        ])
    }
}

impl TwiceDifferentiable for QuarticValley {
    fn hessian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        let ValleyTerms { a, b, .. } = ValleyTerms::at(x);
        let qa = 12.0 * a * a;
        let qb = 144.0 * b * b;
        Ok(dmatrix![
            qa + 110.0, -4.0 * qa, 0.0, -220.0;
            -4.0 * qa, 16.0 * qa + 6.0, -60.0, 0.0;
            0.0, -60.0, qb + 600.0, -qb;
            -220.0, 0.0, -qb, qb + 440.0
        ])
    }
}

/// Rosenbrock's function written as residuals `[10(x2 − x1²), 1 − x1]`.
///
/// The sum of squares is `100(x2 − x1²)² + (1 − x1)²`, minimized at `(1, 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosenbrockResiduals;

impl LeastSquaresProblem for RosenbrockResiduals {
    type Error = Infallible;

    fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![10.0 * (x[1] - x[0] * x[0]), 1.0 - x[0]])
    }

    fn jacobian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        Ok(dmatrix![
            -20.0 * x[0], 10.0;
            -1.0, 0.0
        ])
    }
}
