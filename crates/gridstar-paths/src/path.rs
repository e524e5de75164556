use gridstar_core::Cell;

use crate::error::SearchError;
use crate::node::NodeTable;

/// Outcome of a search that ran to completion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchResult {
    /// Cells from start to goal inclusive, and the summed step cost.
    Found { path: Vec<Cell>, cost: f64 },
    /// The frontier ran dry before the goal was reached.
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            SearchResult::Found { path, .. } => Some(path),
            SearchResult::NotFound => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            SearchResult::Found { cost, .. } => Some(*cost),
            SearchResult::NotFound => None,
        }
    }
}

/// Follow parent links from `goal` back to `start` and return the cells in
/// start-to-goal order.
///
/// The walk is bounded by the number of cells in the grid; a chain that is
/// broken or longer than that means the node table is corrupt.
pub fn reconstruct_path(
    nodes: &NodeTable,
    start: Cell,
    goal: Cell,
) -> Result<Vec<Cell>, SearchError> {
    let bound = nodes.dims().len();
    let mut path = vec![goal];
    let mut current = goal;
    let mut steps = 0;

    while current != start {
        if steps >= bound {
            return Err(SearchError::CorruptState {
                cell: current,
                steps,
            });
        }
        let parent = nodes
            .get(current)
            .and_then(|n| n.parent())
            .ok_or(SearchError::CorruptState {
                cell: current,
                steps,
            })?;
        path.push(parent);
        current = parent;
        steps += 1;
    }

    path.reverse();
    Ok(path)
}
