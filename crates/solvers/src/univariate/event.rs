use super::Bracket;

/// Emitted after each candidate evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// One-based iteration number.
    pub iter: usize,

    /// The evaluated candidate.
    pub x: f64,

    /// The function value at `x`.
    pub value: f64,

    /// The bracket after absorbing the candidate.
    pub bracket: Bracket,
}
