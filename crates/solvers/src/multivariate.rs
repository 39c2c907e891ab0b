//! Unconstrained minimization of smooth functions of several variables.
//!
//! # Algorithm
//!
//! [`SteepestDescent`] is the shared template. Starting from `x_0`, each step
//!
//! 1. asks a [`Direction`] strategy for a descent direction `d_k`,
//! 2. picks a step length `a_k`, normally with a [`LineSearch`],
//! 3. moves to `x_{k+1} = x_k + a_k·d_k`,
//!
//! and the search stops once `‖a_k·d_k‖ ≤ epsilon` or after `max_iters` steps.
//!
//! # Strategies
//!
//! - [`FirstOrder`] — `d = −g`, with a line search or an analytic step
//! - [`NewtonRaphson`] — `d = −H⁻¹g` with a positive-definite fallback
//! - [`GaussNewton`] — `d = −(2J'J)⁻¹g` for a [`SumOfSquares`] objective
//! - [`QuasiNewton`] — `d = −S·g` with `S` refreshed by a
//!   [`HessianUpdate`]: [`Bfgs`], [`Dfp`], [`RankOne`], [`Huang`], or
//!   [`McCormick`]
//!
//! # Sessions
//!
//! [`SteepestDescent::solve`] returns a [`Session`] that owns the iterate and
//! the strategy's running state. Sessions can be stepped one iteration at a
//! time or driven to completion with [`Session::search`].
//!
//! # Observer Events
//!
//! [`Session::search_observed`] and [`SteepestDescent::minimize`] emit one
//! [`Event`] per completed step. Observers can return [`Action::StopEarly`] to
//! halt immediately.
//!
//! [`SumOfSquares`]: descent_core::SumOfSquares

mod action;
mod config;
mod direction;
mod error;
mod evaluate;
mod event;
mod first_order;
mod gauss_newton;
mod newton_raphson;
mod session;
mod solution;
mod steepest_descent;

pub mod line_search;
pub mod quasi_newton;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use direction::{Context, Direction, Proposal};
pub use error::Error;
pub use event::Event;
pub use first_order::{FirstOrder, StepRule};
pub use gauss_newton::GaussNewton;
pub use line_search::{Exact, Fletcher, LineSearch};
pub use newton_raphson::NewtonRaphson;
pub use quasi_newton::{
    Bfgs, CurvatureError, Dfp, HessianUpdate, Huang, McCormick, QuasiNewton, RankOne,
};
pub use session::Session;
pub use solution::{Solution, Status};
pub use steepest_descent::SteepestDescent;
