/// Errors that can occur during a bracket search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The points are not ordered `lower < initial < upper`.
    #[error("invalid interval: expected lower < initial < upper, got [{lower}, {initial}, {upper}]")]
    InvalidOrder { lower: f64, initial: f64, upper: f64 },

    /// The initial value is not strictly below both endpoint values.
    #[error(
        "invalid interval: f(initial) = {initial} must be below f(lower) = {lower} and f(upper) = {upper}"
    )]
    NotBracketing { lower: f64, initial: f64, upper: f64 },

    /// The Fibonacci search proposed the current best point, so neither
    /// bound can move.
    #[error("cannot identify the moving bound: candidate coincides with the best point {x}")]
    CannotIdentifyMovingBound { x: f64 },

    #[error("function error: {0}")]
    Function(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn function<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Function(Box::new(err))
    }
}
