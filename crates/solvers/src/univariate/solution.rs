use super::Bracket;

/// Indicates why the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Met the algorithm's stopping rule, or the interval could not shrink further.
    Converged,

    /// Reached the iteration limit without meeting the stopping rule.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a bracket search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final search status.
    pub status: Status,

    /// Estimate of the minimizer.
    pub x: f64,

    /// Function value at `x`.
    pub value: f64,

    /// The final bracket.
    pub bracket: Bracket,

    /// Number of candidates evaluated.
    pub iters: usize,
}
