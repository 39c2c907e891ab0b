//! Core traits and types for the Descent minimization toolkit.
//!
//! This crate defines the shared abstractions that the solvers build on:
//!
//! - [`Objective`] — a smooth scalar function of an n-vector with a gradient
//! - [`TwiceDifferentiable`] — an [`Objective`] that also provides its Hessian
//! - [`LeastSquaresProblem`] — a residual vector function with its Jacobian,
//!   adapted into an [`Objective`] by [`SumOfSquares`]
//! - [`UnivariateFunction`] — a scalar function of one variable, used by
//!   bracket searches
//! - [`Observer`] — receives solver events and optionally returns control actions
//!
//! Problems are read-only from the solver's perspective: every method takes
//! `&self`, so one problem may back many concurrent solver sessions as long as
//! its evaluators are themselves thread-safe.

mod observer;
mod problems;

pub use nalgebra::{DMatrix, DVector};
pub use observer::Observer;
pub use problems::{
    LeastSquaresProblem, Objective, SumOfSquares, TwiceDifferentiable, UnivariateFunction,
};
