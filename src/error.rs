//! Error types shared by the board model, the priority queue and the solver.

use std::fmt;

/// Identifies one of the two searches run by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frontier {
    /// The search rooted at the board supplied by the caller.
    Original,
    /// The search rooted at `initial.twin()`.
    Twin,
}

impl fmt::Display for Frontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frontier::Original => write!(f, "original"),
            Frontier::Twin => write!(f, "twin"),
        }
    }
}

/// Everything that can go wrong while building boards or searching them.
///
/// `InvalidBoard` is the only variant a well-behaved caller should ever see:
/// it is reported before any search starts. `EmptyQueue` and `SearchExhausted`
/// indicate a broken invariant inside the search and abort the whole call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    #[error("priority queue is empty")]
    EmptyQueue,
    #[error("{frontier} frontier exhausted after {expansions} expansions without reaching a goal")]
    SearchExhausted { frontier: Frontier, expansions: usize },
    #[error("search aborted after {expansions} expansions")]
    Aborted { expansions: usize },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;
