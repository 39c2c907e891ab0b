use descent_core::{Objective, UnivariateFunction};
use nalgebra::DVector;
use tracing::debug;

use crate::multivariate::{Error, evaluate};
use crate::univariate::{Config, Method};

use super::{LineSearch, Ray};

/// Maximum number of halvings or doublings while bracketing.
const MAX_BRACKET_TRIALS: usize = 60;

/// Line search that minimizes along the ray with a bracket search.
///
/// A bracket `[lower, step, upper]` is found by halving the initial step until
/// it decreases the objective, then doubling it until the objective rises
/// again. The bracket is then handed to the configured [`Method`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exact {
    method: Method,
    config: Config,
    initial_step: f64,
}

impl Default for Exact {
    fn default() -> Self {
        Self {
            method: Method::Brent,
            config: Config::default(),
            initial_step: 1.0,
        }
    }
}

impl Exact {
    #[must_use]
    pub fn new(method: Method, config: Config) -> Self {
        Self {
            method,
            config,
            ..Self::default()
        }
    }

    /// Sets the first trial step used to look for a bracket.
    ///
    /// Non-positive or non-finite values are ignored.
    #[must_use]
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        if initial_step > 0.0 && initial_step.is_finite() {
            self.initial_step = initial_step;
        }
        self
    }
}

impl<P: Objective> LineSearch<P> for Exact {
    fn search(
        &mut self,
        problem: &P,
        x: &DVector<f64>,
        direction: &DVector<f64>,
    ) -> Result<f64, Error> {
        let slope = evaluate::gradient(problem, x)?.dot(direction);
        if !(slope < 0.0) {
            debug!(slope, "not a descent direction, taking a zero step");
            return Ok(0.0);
        }

        let ray = Ray::new(problem, x, direction);
        let at = |t: f64| ray.value(t).map_err(Error::objective);

        let origin = at(0.0)?;
        let mut step = self.initial_step;
        let mut value = at(step)?;

        let mut halvings = 0;
        while !(value < origin) {
            if halvings == MAX_BRACKET_TRIALS {
                debug!(step, "no decrease found along direction");
                return Ok(0.0);
            }
            step *= 0.5;
            value = at(step)?;
            halvings += 1;
        }

        // Invariant: f(lower) > f(step).
        let mut lower = 0.0;
        for _ in 0..MAX_BRACKET_TRIALS {
            let upper = 2.0 * step;
            let upper_value = at(upper)?;

            let points = if upper_value < value {
                lower = step;
                step = upper;
                value = upper_value;
                continue;
            } else if upper_value == value {
                // The minimum lies strictly between two equal values.
                let middle = 0.5 * (step + upper);
                if !(at(middle)? < value) {
                    debug!(step, "objective is flat along direction");
                    return Ok(step);
                }
                [step, middle, upper]
            } else {
                [lower, step, upper]
            };

            let solution = self.method.minimize(&ray, points, &self.config)?;
            return Ok(solution.x);
        }

        debug!(step, "objective keeps decreasing along direction");
        Ok(step)
    }
}
