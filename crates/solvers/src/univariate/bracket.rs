use descent_core::UnivariateFunction;

use super::Error;

/// An interval `[lower, upper]` known to contain a minimum.
///
/// `x` is the best point observed so far and `fx` its value. The search keeps
/// `lower < x < upper` as long as candidates stay inside the open interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower bound.
    pub lower: f64,

    /// Upper bound.
    pub upper: f64,

    /// Best point observed so far.
    pub x: f64,

    /// Function value at `x`.
    pub fx: f64,
}

impl Bracket {
    /// Validates the three starting points and evaluates them.
    ///
    /// The points must satisfy `lower < initial < upper` and `f(initial)` must
    /// be strictly below `f(lower)` and `f(upper)`. NaN coordinates or values
    /// fail these checks.
    pub(super) fn new<F: UnivariateFunction>(f: &F, points: [f64; 3]) -> Result<Self, Error> {
        let [lower, initial, upper] = points;
        if !(lower < initial && initial < upper) {
            return Err(Error::InvalidOrder {
                lower,
                initial,
                upper,
            });
        }

        let f_lower = f.value(lower).map_err(Error::function)?;
        let f_initial = f.value(initial).map_err(Error::function)?;
        let f_upper = f.value(upper).map_err(Error::function)?;
        if !(f_initial < f_lower && f_initial < f_upper) {
            return Err(Error::NotBracketing {
                lower: f_lower,
                initial: f_initial,
                upper: f_upper,
            });
        }

        Ok(Self {
            lower,
            upper,
            x: initial,
            fx: f_initial,
        })
    }

    /// Returns the width of the interval.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns the midpoint of the interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Returns whether `x` lies strictly inside the interval.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.lower < x && x < self.upper
    }

    /// Shrinks the interval around a newly evaluated point.
    ///
    /// An improving point becomes the new best and the old best becomes the
    /// bound on the side the point came from. Otherwise the point becomes the
    /// bound on its own side.
    pub(super) fn absorb(&mut self, x: f64, fx: f64) {
        if fx < self.fx {
            if x < self.x {
                self.upper = self.x;
            } else {
                self.lower = self.x;
            }
            self.x = x;
            self.fx = fx;
        } else if x < self.x {
            self.lower = x;
        } else {
            self.upper = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn parabola(x: f64) -> f64 {
        (x - 2.0).powi(2)
    }

    #[test]
    fn rejects_unordered_points() {
        let result = Bracket::new(&parabola, [0.0, 5.0, 1.0]);
        assert!(matches!(result, Err(Error::InvalidOrder { .. })));

        let result = Bracket::new(&parabola, [1.0, 1.0, 5.0]);
        assert!(matches!(result, Err(Error::InvalidOrder { .. })));

        let result = Bracket::new(&parabola, [f64::NAN, 1.0, 5.0]);
        assert!(matches!(result, Err(Error::InvalidOrder { .. })));
    }

    #[test]
    fn rejects_points_that_do_not_bracket() {
        // f(3) = 1 is not below f(2.5) = 0.25.
        let result = Bracket::new(&parabola, [2.5, 3.0, 5.0]);
        assert!(matches!(result, Err(Error::NotBracketing { .. })));
    }

    #[test]
    fn improving_point_moves_bound_to_old_best() {
        let mut bracket = Bracket::new(&parabola, [0.0, 1.0, 5.0]).unwrap();

        // f(3.5) = 2.25 does not improve on f(1) = 1.
        bracket.absorb(3.5, parabola(3.5));
        assert_relative_eq!(bracket.lower, 0.0);
        assert_relative_eq!(bracket.upper, 3.5);
        assert_relative_eq!(bracket.x, 1.0);

        bracket.absorb(2.5, parabola(2.5));
        assert_relative_eq!(bracket.lower, 1.0);
        assert_relative_eq!(bracket.upper, 3.5);
        assert_relative_eq!(bracket.x, 2.5);
        assert_relative_eq!(bracket.fx, 0.25);
    }

    #[test]
    fn worse_point_becomes_bound_on_its_side() {
        let mut bracket = Bracket::new(&parabola, [0.0, 2.0, 5.0]).unwrap();

        bracket.absorb(1.0, parabola(1.0));
        assert_relative_eq!(bracket.lower, 1.0);

        bracket.absorb(4.0, parabola(4.0));
        assert_relative_eq!(bracket.upper, 4.0);
        assert_relative_eq!(bracket.x, 2.0);
        assert_relative_eq!(bracket.width(), 3.0);
        assert_relative_eq!(bracket.midpoint(), 2.5);
    }
}
