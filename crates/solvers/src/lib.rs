//! Numerical minimizers for smooth objectives.
//!
//! - [`univariate`] — bracket searches (golden section, Fibonacci, Brent) that
//!   shrink a three-point interval around a minimum of a scalar function
//! - [`multivariate`] — a steepest-descent template driven by pluggable
//!   direction strategies (gradient descent, Newton-Raphson, Gauss-Newton, and
//!   the quasi-Newton family) and line searches
//! - [`linalg`] — the inverse and positive-definite corrections the direction
//!   strategies fall back on

pub mod linalg;
pub mod multivariate;
pub mod univariate;
