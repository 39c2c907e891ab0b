//! Shared test problems for the descent integration tests.

pub mod test_functions;
