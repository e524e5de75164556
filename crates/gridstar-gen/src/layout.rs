//! Obstacle layout generation.
//!
//! Provides the layouts a grid can be seeded with:
//! - **Column snake**: every odd column is a wall with a single gap, the gaps
//!   alternating between the bottom and top rows, forcing a serpentine path.
//! - **Row snake**: the same with odd rows, gaps alternating between the
//!   last and first columns.
//! - **Random**: a fixed number of distinct obstacles scattered uniformly.
//! - **Manual**: an explicit list of obstacle cells.

use gridstar_core::{Cell, Dims, GridError, ObstacleGrid};
use log::debug;
use rand::{Rng, RngExt};

/// Errors that can occur while generating a layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenError {
    /// More random obstacles were requested than the grid can hold while
    /// leaving room for a start and a goal.
    #[error("cannot place {requested} obstacles, at most {capacity} fit")]
    TooManyObstacles { requested: usize, capacity: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Which obstacles to place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layout {
    #[default]
    Empty,
    ColumnSnake,
    RowSnake,
    Random {
        count: usize,
    },
    Manual(Vec<Cell>),
}

/// Block every odd column except one gap per column, alternating bottom row
/// and top row (the first gap is at the bottom).
pub fn column_snake(grid: &mut ObstacleGrid) -> usize {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut placed = 0;
    let mut gap_at_top = false;
    for col in (1..cols).step_by(2) {
        let gap = if gap_at_top { 0 } else { rows - 1 };
        gap_at_top = !gap_at_top;
        for row in (0..rows).filter(|&r| r != gap) {
            placed += block(grid, Cell::new(row, col));
        }
    }
    placed
}

/// Block every odd row except one gap per row, alternating last column and
/// first column (the first gap is in the last column).
pub fn row_snake(grid: &mut ObstacleGrid) -> usize {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut placed = 0;
    let mut gap_at_left = false;
    for row in (1..rows).step_by(2) {
        let gap = if gap_at_left { 0 } else { cols - 1 };
        gap_at_left = !gap_at_left;
        for col in (0..cols).filter(|&c| c != gap) {
            placed += block(grid, Cell::new(row, col));
        }
    }
    placed
}

/// Block `cell`, returning 1 if it was free before.
fn block(grid: &mut ObstacleGrid, cell: Cell) -> usize {
    let was_free = grid.is_free(cell);
    usize::from(grid.set_blocked(cell, true).is_ok() && was_free)
}

/// Layout generator. Owns the random source used by [`Layout::Random`].
pub struct LayoutGen<R: Rng> {
    pub rng: R,
    keep_clear: Vec<Cell>,
}

impl<R: Rng> LayoutGen<R> {
    /// Create a new generator drawing randomness from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            keep_clear: Vec::new(),
        }
    }

    /// Cells random placement must never block (typically the intended
    /// start and goal).
    pub fn with_keep_clear(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.keep_clear = cells.into_iter().collect();
        self
    }

    /// Build a fresh grid of `dims` with `layout` applied.
    pub fn build(&mut self, dims: Dims, layout: &Layout) -> Result<ObstacleGrid, GenError> {
        let mut grid = ObstacleGrid::new(dims.rows, dims.cols)?;
        self.apply(&mut grid, layout)?;
        Ok(grid)
    }

    /// Add the obstacles of `layout` to `grid`. Returns the number of cells
    /// that became blocked.
    pub fn apply(&mut self, grid: &mut ObstacleGrid, layout: &Layout) -> Result<usize, GenError> {
        let placed = match layout {
            Layout::Empty => 0,
            Layout::ColumnSnake => column_snake(grid),
            Layout::RowSnake => row_snake(grid),
            Layout::Random { count } => self.scatter(grid, *count)?,
            Layout::Manual(cells) => {
                let mut placed = 0;
                for &cell in cells {
                    placed += usize::from(grid.is_free(cell));
                    grid.set_blocked(cell, true)?;
                }
                placed
            }
        };
        debug!(
            "[layout] {} placed {placed} obstacles on {} grid",
            layout_name(layout),
            grid.dims()
        );
        Ok(placed)
    }

    /// Block `count` distinct free cells chosen uniformly at random.
    fn scatter(&mut self, grid: &mut ObstacleGrid, count: usize) -> Result<usize, GenError> {
        let capacity = grid.dims().len().saturating_sub(2);
        if count > capacity {
            return Err(GenError::TooManyObstacles {
                requested: count,
                capacity,
            });
        }
        let mut candidates: Vec<Cell> = grid
            .iter()
            .filter(|&(c, blocked)| !blocked && !self.keep_clear.contains(&c))
            .map(|(c, _)| c)
            .collect();
        if count > candidates.len() {
            return Err(GenError::TooManyObstacles {
                requested: count,
                capacity: candidates.len(),
            });
        }
        // Partial Fisher-Yates: the first `count` slots end up a uniform sample.
        for i in 0..count {
            let j = self.rng.random_range(i..candidates.len());
            candidates.swap(i, j);
            grid.set_blocked(candidates[i], true)?;
        }
        Ok(count)
    }
}

fn layout_name(layout: &Layout) -> &'static str {
    match layout {
        Layout::Empty => "empty",
        Layout::ColumnSnake => "column snake",
        Layout::RowSnake => "row snake",
        Layout::Random { .. } => "random",
        Layout::Manual(_) => "manual",
    }
}
