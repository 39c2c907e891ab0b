//! Bracket searches for minimizing a function of one variable.
//!
//! # Algorithm
//!
//! Every search starts from three points `lower < initial < upper` with
//! `f(initial)` strictly below both `f(lower)` and `f(upper)`, so the interval
//! is known to contain a minimum. Each iteration proposes a candidate inside
//! the interval, evaluates it, and shrinks the interval so it keeps bracketing
//! the best point found:
//!
//! - if the candidate improves on the best value, the old best point becomes
//!   the bound on the side the candidate came from;
//! - otherwise the candidate itself becomes the bound on its side.
//!
//! The algorithms differ in how candidates are proposed and when they stop:
//!
//! - [`golden_section`] — divides the larger sub-interval at the golden ratio
//!   and stops once the interval is narrower than `epsilon`
//! - [`fibonacci`] — shrinks by ratios of consecutive Fibonacci numbers over a
//!   fixed budget of `max_iters` evaluations
//! - [`brent`] — parabolic interpolation with a golden-section fallback
//!
//! A candidate that lands outside the open interval ends the search early with
//! the current best point.
//!
//! # Observer Events
//!
//! Each evaluated candidate produces one [`Event`] after the bracket has been
//! updated. Observers can return [`Action::StopEarly`] to halt immediately.

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod search;
mod solution;

pub mod brent;
pub mod fibonacci;
pub mod golden_section;


pub use action::Action;
pub use bracket::Bracket;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use descent_core::UnivariateFunction;

/// Selects one of the bracket-search algorithms at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    GoldenSection,
    Fibonacci,
    #[default]
    Brent,
}

impl Method {
    /// Runs the selected algorithm without observer support.
    ///
    /// # Errors
    ///
    /// Returns an error if the points do not form a valid bracket, the
    /// function fails, or the algorithm reports an internal inconsistency.
    pub fn minimize<F: UnivariateFunction>(
        self,
        f: &F,
        points: [f64; 3],
        config: &Config,
    ) -> Result<Solution, Error> {
        match self {
            Self::GoldenSection => golden_section::minimize_unobserved(f, points, config),
            Self::Fibonacci => fibonacci::minimize_unobserved(f, points, config),
            Self::Brent => brent::minimize_unobserved(f, points, config),
        }
    }
}
