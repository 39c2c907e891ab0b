use thiserror::Error;

/// Convergence parameters for the multivariate minimizers.
///
/// A search stops once an increment `Δx` satisfies `‖Δx‖ ≤ epsilon`, or after
/// `max_iters` steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    epsilon: f64,
}

/// Errors that can occur when validating a multivariate solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("epsilon must be finite and non-negative")]
    Epsilon,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            epsilon: 1e-8,
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is negative or non-finite.
    pub fn new(max_iters: usize, epsilon: f64) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::Epsilon);
        }

        Ok(Self { max_iters, epsilon })
    }

    /// Returns the maximum number of steps taken by a search.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the magnitude below which increments and gradient changes are
    /// treated as zero.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}
