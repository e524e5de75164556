//! A* shortest-path search over obstacle grids.
//!
//! The search moves between the eight cells around each cell, paying the
//! Euclidean step length (1 for orthogonal moves, √2 for diagonal ones), and
//! is guided by a swappable [`Heuristic`].
//!
//! ```
//! use gridstar_core::{Cell, ObstacleGrid};
//! use gridstar_paths::{SearchResult, build_search};
//!
//! let grid = ObstacleGrid::new(3, 3).unwrap();
//! let mut search = build_search(&grid, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
//! match search.run().unwrap() {
//!     SearchResult::Found { path, cost } => {
//!         assert_eq!(path.len(), 3);
//!         assert!((cost - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
//!     }
//!     SearchResult::NotFound => unreachable!(),
//! }
//! ```
//!
//! # Building blocks
//!
//! | Item | Role |
//! |---|---|
//! | [`SearchEngine`] | drives the A* loop, one instance per search |
//! | [`Frontier`] | open set ordered by f-value |
//! | [`ClosedSet`] | cells already expanded |
//! | [`NodeTable`] | per-cell g, f and parent bookkeeping |
//! | [`Neighbors`] | the clipped 3x3 neighborhood of a cell |
//! | [`Heuristic`] | `estimate(cell, goal)`; see [`ScaledEuclidean`], [`Octile`] |

mod cancel;
mod closed;
mod config;
mod distance;
mod engine;
mod error;
mod frontier;
mod heuristic;
mod neighbors;
mod node;
mod path;

pub use cancel::CancelToken;
pub use closed::ClosedSet;
pub use config::{SearchConfig, TieBreak};
pub use distance::{euclidean, octile, step_cost};
pub use engine::{SearchEngine, SearchState, SearchStats, build_search, find_path};
pub use error::{InvalidInputReason, SearchError};
pub use frontier::{Frontier, FrontierEntry};
pub use heuristic::{DEFAULT_SCALE, Euclidean, Heuristic, HeuristicKind, Octile, ScaledEuclidean};
pub use neighbors::{Neighbors, filter_obstacles};
pub use node::{NodeState, NodeTable};
pub use path::{SearchResult, reconstruct_path};
