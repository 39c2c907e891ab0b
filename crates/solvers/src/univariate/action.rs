/// Actions an observer can take during a bracket search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the search early and return the best point found so far.
    StopEarly,
}
