use descent_core::{Observer, UnivariateFunction};
use tracing::debug;

use super::{Action, Bracket, Config, Error, Event, Solution, Status};

/// The division rule that distinguishes one bracket search from another.
pub(super) trait Division {
    /// Prepares any auxiliary state from the validated starting bracket.
    fn start(&mut self, _bracket: &Bracket) {}

    /// Returns whether the stopping rule is met.
    fn is_converged(&self, bracket: &Bracket, config: &Config) -> bool;

    /// Proposes the next point to evaluate. `iter` is zero-based.
    fn candidate(&mut self, bracket: &Bracket, iter: usize) -> Result<f64, Error>;

    /// Absorbs an evaluated candidate into the bracket.
    fn record(&mut self, bracket: &mut Bracket, x: f64, fx: f64) {
        bracket.absorb(x, fx);
    }

    /// Returns the minimizer estimate for the final bracket.
    fn estimate(&self, bracket: &Bracket) -> f64 {
        bracket.midpoint()
    }

    /// Whether running the full iteration budget counts as convergence.
    fn converges_on_budget(&self) -> bool {
        false
    }
}

/// Shared bracket search loop.
pub(super) fn search<F, D, Obs>(
    f: &F,
    points: [f64; 3],
    config: &Config,
    mut division: D,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    F: UnivariateFunction,
    D: Division,
    Obs: Observer<Event, Action>,
{
    let mut bracket = Bracket::new(f, points)?;
    division.start(&bracket);

    for iter in 0..config.max_iters() {
        if division.is_converged(&bracket, config) {
            return finish(f, &division, bracket, Status::Converged, iter);
        }

        let x = division.candidate(&bracket, iter)?;
        if !bracket.contains(x) {
            debug!(
                x,
                lower = bracket.lower,
                upper = bracket.upper,
                "candidate outside bracket, stopping"
            );
            return finish(f, &division, bracket, Status::Converged, iter);
        }

        let fx = f.value(x).map_err(Error::function)?;
        division.record(&mut bracket, x, fx);

        let event = Event {
            iter: iter + 1,
            x,
            value: fx,
            bracket,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(f, &division, bracket, Status::StoppedByObserver, iter + 1);
        }
    }

    let status = if division.converges_on_budget() || division.is_converged(&bracket, config) {
        Status::Converged
    } else {
        Status::MaxIters
    };
    finish(f, &division, bracket, status, config.max_iters())
}

fn finish<F, D>(
    f: &F,
    division: &D,
    bracket: Bracket,
    status: Status,
    iters: usize,
) -> Result<Solution, Error>
where
    F: UnivariateFunction,
    D: Division,
{
    let x = division.estimate(&bracket);
    let value = if x == bracket.x {
        bracket.fx
    } else {
        f.value(x).map_err(Error::function)?
    };

    Ok(Solution {
        status,
        x,
        value,
        bracket,
        iters,
    })
}
