//! Golden section search.
//!
//! Each candidate divides the larger of the two sub-intervals around the best
//! point at the golden ratio. The search stops once `upper - lower < epsilon`
//! and reports the best point observed, not the midpoint.

use descent_core::{Observer, UnivariateFunction};

use super::{
    Action, Bracket, Config, Error, Event, Solution,
    search::{Division, search},
};

/// The golden section ratio `(3 - √5) / 2`.
pub(super) const GOLDEN: f64 = 0.381_966_011_250_105;

struct GoldenSection;

impl Division for GoldenSection {
    fn is_converged(&self, bracket: &Bracket, config: &Config) -> bool {
        bracket.width() < config.epsilon()
    }

    fn candidate(&mut self, bracket: &Bracket, _iter: usize) -> Result<f64, Error> {
        let right = bracket.upper - bracket.x;
        let left = bracket.x - bracket.lower;
        Ok(if right > left {
            bracket.x + GOLDEN * right
        } else {
            bracket.x - GOLDEN * left
        })
    }

    fn estimate(&self, bracket: &Bracket) -> f64 {
        bracket.x
    }
}

/// Minimizes `f` over the bracket `[lower, initial, upper]`.
///
/// # Errors
///
/// Returns an error if the points do not form a valid bracket or `f` fails.
pub fn minimize<F, Obs>(
    f: &F,
    points: [f64; 3],
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    F: UnivariateFunction,
    Obs: Observer<Event, Action>,
{
    search(f, points, config, GoldenSection, observer)
}

/// Minimizes `f` without observer support.
///
/// # Errors
///
/// Returns an error if the points do not form a valid bracket or `f` fails.
pub fn minimize_unobserved<F: UnivariateFunction>(
    f: &F,
    points: [f64; 3],
    config: &Config,
) -> Result<Solution, Error> {
    minimize(f, points, config, ())
}
