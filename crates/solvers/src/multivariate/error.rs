use std::error::Error as StdError;

use crate::univariate;

use super::CurvatureError;

/// Errors that can occur during a multivariate search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A session was stepped or queried before `set_initials`.
    #[error("no initial point has been set")]
    MissingInitialPoint,

    /// The initial point has no coordinates.
    #[error("initial point must have at least one coordinate")]
    EmptyInitialPoint,

    /// An evaluator returned a vector or matrix of the wrong size.
    #[error("{what} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The objective, gradient, Hessian, residuals or Jacobian failed.
    #[error("objective error: {0}")]
    Objective(Box<dyn StdError + Send + Sync>),

    /// An inverse-Hessian update hit a near-zero curvature denominator.
    #[error(transparent)]
    DegenerateCurvature(#[from] CurvatureError),

    /// A bracket-based line search failed for a reason other than the
    /// objective itself.
    #[error("line search error: {0}")]
    LineSearch(univariate::Error),
}

impl From<univariate::Error> for Error {
    fn from(err: univariate::Error) -> Self {
        match err {
            univariate::Error::Function(source) => Self::Objective(source),
            other => Self::LineSearch(other),
        }
    }
}

impl Error {
    pub(crate) fn objective<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Objective(Box::new(err))
    }

    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}
