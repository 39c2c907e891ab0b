use nalgebra::DVector;

/// Emitted after each completed step of a search.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// One-based step number.
    pub iter: usize,

    /// The new iterate `x_{k+1}`.
    pub x: &'a DVector<f64>,

    /// The direction `d_k` that was followed.
    pub direction: &'a DVector<f64>,

    /// The step length `a_k` along `direction`.
    pub step_length: f64,

    /// The norm of the increment `Δx = a_k · d_k`.
    pub increment_norm: f64,
}
