use descent_core::{Objective, Observer};
use nalgebra::DVector;

use super::{
    Action, Config, Error, Event, Session, Solution,
    direction::Direction,
    line_search::{Fletcher, LineSearch},
};

/// The shared descent template: a direction strategy plus a line search.
///
/// Each iteration asks the strategy for a direction `d_k`, picks a step
/// length `a_k` (usually from the line search), and moves by `Δx = a_k·d_k`.
/// A search stops once `‖Δx‖ ≤ epsilon` or after `max_iters` steps.
///
/// The solver itself is immutable. [`SteepestDescent::solve`] creates an
/// independent [`Session`] holding all running state, so one solver and one
/// problem can back any number of concurrent sessions.
#[derive(Debug, Clone)]
pub struct SteepestDescent<D, L = Fletcher> {
    config: Config,
    direction: D,
    line_search: L,
}

impl<D> SteepestDescent<D, Fletcher> {
    /// Creates a solver using [`Fletcher`]'s line search with default parameters.
    #[must_use]
    pub fn new(config: Config, direction: D) -> Self {
        Self {
            config,
            direction,
            line_search: Fletcher::default(),
        }
    }
}

impl<D, L> SteepestDescent<D, L> {
    /// Replaces the line search.
    #[must_use]
    pub fn with_line_search<M>(self, line_search: M) -> SteepestDescent<D, M> {
        SteepestDescent {
            config: self.config,
            direction: self.direction,
            line_search,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn direction(&self) -> &D {
        &self.direction
    }

    #[must_use]
    pub fn line_search(&self) -> &L {
        &self.line_search
    }

    /// Starts a new session on `problem`.
    ///
    /// The session must be seeded with [`Session::set_initials`] before
    /// stepping, or driven with [`Session::search`].
    pub fn solve<'a, P>(&'a self, problem: &'a P) -> Session<'a, P, D, L>
    where
        P: Objective,
        D: Direction<P>,
        L: LineSearch<P> + Clone,
    {
        Session::new(self, problem)
    }

    /// Minimizes `problem` from `x0`, reporting each step to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` is empty, an evaluator fails or returns the
    /// wrong dimension, or the direction strategy fails.
    pub fn minimize<P, Obs>(
        &self,
        problem: &P,
        x0: DVector<f64>,
        observer: Obs,
    ) -> Result<Solution, Error>
    where
        P: Objective,
        D: Direction<P>,
        L: LineSearch<P> + Clone,
        Obs: for<'e> Observer<Event<'e>, Action>,
    {
        self.solve(problem).search_observed(x0, observer)
    }

    /// Minimizes `problem` from `x0` without observer support.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` is empty, an evaluator fails or returns the
    /// wrong dimension, or the direction strategy fails.
    pub fn minimize_unobserved<P>(&self, problem: &P, x0: DVector<f64>) -> Result<Solution, Error>
    where
        P: Objective,
        D: Direction<P>,
        L: LineSearch<P> + Clone,
    {
        self.minimize(problem, x0, ())
    }
}
