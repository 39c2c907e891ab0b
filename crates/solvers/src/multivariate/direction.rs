use descent_core::Objective;
use nalgebra::DVector;

use super::{Config, Error};

/// What a direction strategy asks the template to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Proposal {
    /// Search along the direction with the session's line search.
    LineSearch(DVector<f64>),

    /// Move `step · direction` without consulting the line search.
    Fixed { direction: DVector<f64>, step: f64 },
}

/// The current iterate and history a strategy sees when proposing a direction.
#[derive(Debug)]
pub struct Context<'a, P> {
    pub problem: &'a P,
    pub config: &'a Config,

    /// The current iterate `x_k`.
    pub x: &'a DVector<f64>,

    /// The increment `Δx` that produced `x_k`, if any step has been taken.
    pub last_increment: Option<&'a DVector<f64>>,
}

/// A descent-direction strategy plugged into the steepest-descent template.
///
/// Strategies are stateless values shared by every session; anything that
/// evolves during a search (such as an inverse-Hessian approximation) lives
/// in [`Direction::State`], which each session owns privately.
pub trait Direction<P: Objective> {
    /// Per-session running state.
    type State;

    /// Creates the state for a search starting at `x0`.
    fn init(&self, x0: &DVector<f64>) -> Self::State;

    /// Proposes how to move from `context.x`.
    ///
    /// # Errors
    ///
    /// Returns an error if an evaluator fails or the strategy cannot produce
    /// a direction.
    fn propose(&self, state: &mut Self::State, context: Context<'_, P>) -> Result<Proposal, Error>;

    /// Reports the step length the line search chose for a
    /// [`Proposal::LineSearch`] direction.
    fn accept(&self, _state: &mut Self::State, _step: f64) {}
}
