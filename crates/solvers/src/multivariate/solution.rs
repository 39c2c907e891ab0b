use nalgebra::DVector;

/// Indicates why a search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The last increment satisfied `‖Δx‖ ≤ epsilon`.
    Converged,

    /// The line search found no decrease along the proposed direction while
    /// the gradient was still larger than `epsilon`.
    NoDescent,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a multivariate search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final search status.
    pub status: Status,

    /// The final iterate.
    pub x: DVector<f64>,

    /// Objective value at `x`.
    pub value: f64,

    /// Number of steps taken.
    pub iters: usize,
}
