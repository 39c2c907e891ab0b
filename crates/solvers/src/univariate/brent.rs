//! Brent's method.
//!
//! Fits a parabola through the three lowest points seen so far and steps to
//! its vertex when that step is trustworthy: it must land inside the bracket,
//! move less than half the step before last, and come from a non-degenerate
//! fit. Otherwise it takes a golden-section step into the larger sub-interval.
//!
//! The search stops when `½(upper − lower) + |x − mid| ≤ 2·tol`, where
//! `tol = epsilon·|x| + f64::EPSILON`; the absolute term keeps the rule
//! meaningful for a minimizer at zero. The best point observed is returned.

use descent_core::{Observer, UnivariateFunction};

use super::{
    Action, Bracket, Config, Error, Event, Solution,
    golden_section::GOLDEN,
    search::{Division, search},
};

struct Brent {
    epsilon: f64,
    /// Second-lowest point and its value.
    w: f64,
    fw: f64,
    /// Previous value of `w`.
    v: f64,
    fv: f64,
    /// Last step taken.
    step: f64,
    /// Step taken before `step`.
    prev_step: f64,
}

impl Brent {
    fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            w: 0.0,
            fw: 0.0,
            v: 0.0,
            fv: 0.0,
            step: 0.0,
            prev_step: 0.0,
        }
    }

    fn tolerance(&self, x: f64) -> f64 {
        self.epsilon * x.abs() + f64::EPSILON
    }

    /// Golden-section step into the larger sub-interval.
    fn golden_step(&mut self, bracket: &Bracket) {
        self.prev_step = if bracket.x >= bracket.midpoint() {
            bracket.lower - bracket.x
        } else {
            bracket.upper - bracket.x
        };
        self.step = GOLDEN * self.prev_step;
    }

    /// Attempts a parabolic step, returning `false` if it is not acceptable.
    fn parabolic_step(&mut self, bracket: &Bracket, tol: f64) -> bool {
        let Bracket { lower, upper, x, fx } = *bracket;

        let r = (x - self.w) * (fx - self.fv);
        let q = (x - self.v) * (fx - self.fw);
        let mut p = (x - self.v) * q - (x - self.w) * r;
        let mut q = 2.0 * (q - r);
        if q > 0.0 {
            p = -p;
        }
        q = q.abs();

        let step_before_last = self.prev_step;
        self.prev_step = self.step;

        if p.abs() >= (0.5 * q * step_before_last).abs()
            || p <= q * (lower - x)
            || p >= q * (upper - x)
        {
            return false;
        }

        self.step = p / q;
        let u = x + self.step;
        if u - lower < 2.0 * tol || upper - u < 2.0 * tol {
            self.step = tol.copysign(bracket.midpoint() - x);
        }
        true
    }
}

impl Division for Brent {
    fn start(&mut self, bracket: &Bracket) {
        self.w = bracket.x;
        self.v = bracket.x;
        self.fw = bracket.fx;
        self.fv = bracket.fx;
    }

    fn is_converged(&self, bracket: &Bracket, _config: &Config) -> bool {
        let tol = self.tolerance(bracket.x);
        0.5 * bracket.width() + (bracket.x - bracket.midpoint()).abs() <= 2.0 * tol
    }

    fn candidate(&mut self, bracket: &Bracket, _iter: usize) -> Result<f64, Error> {
        let tol = self.tolerance(bracket.x);

        if self.prev_step.abs() <= tol || !self.parabolic_step(bracket, tol) {
            self.golden_step(bracket);
        }

        Ok(if self.step.abs() >= tol {
            bracket.x + self.step
        } else {
            bracket.x + tol.copysign(self.step)
        })
    }

    fn record(&mut self, bracket: &mut Bracket, u: f64, fu: f64) {
        let (x, fx) = (bracket.x, bracket.fx);
        bracket.absorb(u, fu);

        if fu < fx {
            self.v = self.w;
            self.fv = self.fw;
            self.w = x;
            self.fw = fx;
        } else if fu <= self.fw || self.w == x {
            self.v = self.w;
            self.fv = self.fw;
            self.w = u;
            self.fw = fu;
        } else if fu <= self.fv || self.v == x || self.v == self.w {
            self.v = u;
            self.fv = fu;
        }
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
    search(f, points, config, Brent::new(config.epsilon()), observer)
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
