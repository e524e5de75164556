use crate::heuristic::HeuristicKind;

/// How the frontier orders entries whose f-values are equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// Earlier insertion first.
    #[default]
    Fifo,
    /// Lower heuristic estimate first (the cell closer to the goal), then
    /// earlier insertion.
    LowerHeuristic,
}

/// Tunables for a single search.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Ordering among frontier entries with equal f.
    pub tie_break: TieBreak,
    /// Give up with [`SearchError::ExpansionLimit`](crate::SearchError::ExpansionLimit)
    /// after this many expansions. `None` means unbounded.
    pub max_expansions: Option<usize>,
    /// Heuristic used by [`build_search`](crate::build_search). Ignored by
    /// engines given an explicit heuristic via
    /// [`with_heuristic`](crate::SearchEngine::with_heuristic).
    pub heuristic: HeuristicKind,
}

impl SearchConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }
}
