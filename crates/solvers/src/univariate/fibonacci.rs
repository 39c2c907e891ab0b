//! Fibonacci search.
//!
//! The interval shrinks by ratios of consecutive Fibonacci numbers, planned
//! up front for exactly `max_iters` evaluations. There is no tolerance-based
//! stop: the reduction factor is fixed by the budget, and running the full
//! budget counts as convergence. The estimate is the midpoint of the final
//! interval.
//!
//! The budget must suit the starting width. Once the interval approaches
//! floating-point resolution a candidate can coincide with the best point,
//! and the search fails with [`Error::CannotIdentifyMovingBound`].

use descent_core::{Observer, UnivariateFunction};

use super::{
    Action, Bracket, Config, Error, Event, Solution,
    search::{Division, search},
};

struct Fibonacci {
    /// `1, 2, 3, 5, 8, ...` with `max_iters + 2` entries.
    sequence: Vec<f64>,
}

impl Fibonacci {
    fn new(max_iters: usize) -> Self {
        let mut sequence = Vec::with_capacity(max_iters + 2);
        let (mut a, mut b) = (1.0, 2.0);
        for _ in 0..max_iters + 2 {
            sequence.push(a);
            (a, b) = (b, a + b);
        }
        Self { sequence }
    }

    /// Shrink ratio for the zero-based iteration `iter`.
    ///
    /// Falls from about 0.618 toward 2/3 on the last planned iteration.
    fn ratio(&self, iter: usize) -> f64 {
        let n = self.sequence.len() - 2;
        self.sequence[n - iter] / self.sequence[n - iter + 1]
    }
}

impl Division for Fibonacci {
    fn is_converged(&self, _bracket: &Bracket, _config: &Config) -> bool {
        false
    }

    fn candidate(&mut self, bracket: &Bracket, iter: usize) -> Result<f64, Error> {
        let ratio = self.ratio(iter);
        let width = bracket.width();
        let x = if bracket.x < bracket.midpoint() {
            bracket.lower + ratio * width
        } else {
            bracket.upper - ratio * width
        };

        if x == bracket.x {
            return Err(Error::CannotIdentifyMovingBound { x });
        }
        Ok(x)
    }

    fn converges_on_budget(&self) -> bool {
        true
    }
}

/// Minimizes `f` over the bracket `[lower, initial, upper]`.
///
/// # Errors
///
/// Returns an error if the points do not form a valid bracket, `f` fails, or
/// the interval collapses so that no bound can move.
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
    search(f, points, config, Fibonacci::new(config.max_iters()), observer)
}

/// Minimizes `f` without observer support.
///
/// # Errors
///
/// Returns an error if the points do not form a valid bracket, `f` fails, or
/// the interval collapses so that no bound can move.
pub fn minimize_unobserved<F: UnivariateFunction>(
    f: &F,
    points: [f64; 3],
    config: &Config,
) -> Result<Solution, Error> {
    minimize(f, points, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn sequence_starts_at_one_two() {
        let fib = Fibonacci::new(4);
        assert_eq!(fib.sequence, vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0]);
    }

    #[test]
    fn ratios_run_from_golden_toward_two_thirds() {
        let fib = Fibonacci::new(4);
        assert_relative_eq!(fib.ratio(0), 8.0 / 13.0);
        assert_relative_eq!(fib.ratio(3), 2.0 / 3.0);
    }
}
