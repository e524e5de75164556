use std::fmt;

use gridstar_core::Cell;

/// Why [`build_search`](crate::build_search) rejected its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidInputReason {
    StartOutOfBounds,
    GoalOutOfBounds,
    StartBlocked,
    GoalBlocked,
}

impl fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StartOutOfBounds => "start is out of bounds",
            Self::GoalOutOfBounds => "goal is out of bounds",
            Self::StartBlocked => "start is on an obstacle",
            Self::GoalBlocked => "goal is on an obstacle",
        };
        f.write_str(s)
    }
}

/// Errors a search can end with.
///
/// An unreachable goal is not an error; it is reported as
/// [`SearchResult::NotFound`](crate::SearchResult::NotFound).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Start or goal is unusable; detected before the search begins.
    #[error("invalid search input: {reason} at {cell}")]
    InvalidInput {
        reason: InvalidInputReason,
        cell: Cell,
    },

    /// The parent chain from the goal does not lead back to the start.
    #[error("corrupt search state: parent chain broken at {cell} after {steps} steps")]
    CorruptState { cell: Cell, steps: usize },

    /// The search was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("search cancelled")]
    Cancelled,

    /// [`SearchConfig::max_expansions`](crate::SearchConfig::max_expansions)
    /// was reached before the search finished.
    #[error("search gave up after {limit} expansions")]
    ExpansionLimit { limit: usize },
}
