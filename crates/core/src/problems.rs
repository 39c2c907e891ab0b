mod least_squares;
mod objective;
mod univariate;

pub use least_squares::{LeastSquaresProblem, SumOfSquares};
pub use objective::{Objective, TwiceDifferentiable};
pub use univariate::UnivariateFunction;
