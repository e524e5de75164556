//! The [`ObstacleGrid`] type — a rectangular map of blocked cells.
//!
//! The grid is plain owned data (`Send + Sync`). A search borrows it
//! immutably, so any number of searches may run over the same grid at once;
//! editing the grid requires `&mut` and therefore cannot overlap a search.

use std::fmt;

use crate::error::GridError;
use crate::geom::{Cell, Dims};

/// Character used for a blocked cell in map text.
pub const BLOCKED_CHAR: char = '#';
/// Character used for a free cell in map text.
pub const FREE_CHAR: char = '.';

/// A rectangular obstacle map, at least 1x1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleGrid {
    dims: Dims,
    blocked: Vec<bool>,
}

impl ObstacleGrid {
    /// Create an obstacle-free grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let dims = Dims::new(rows, cols);
        if dims.is_empty() {
            return Err(GridError::EmptyDimension { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        let mut blocked = Vec::new();
        blocked
            .try_reserve_exact(len)
            .map_err(|_| GridError::TooLarge { rows, cols })?;
        blocked.resize(len, false);
        Ok(Self { dims, blocked })
    }

    /// Create a grid and block every cell in `obstacles`.
    pub fn with_obstacles(
        rows: usize,
        cols: usize,
        obstacles: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols)?;
        for cell in obstacles {
            grid.set_blocked(cell, true)?;
        }
        Ok(grid)
    }

    /// Parse a grid from ASCII art: `#` is blocked, `.` is free.
    ///
    /// Leading and trailing whitespace of the whole text is ignored. Every
    /// line must have the same width.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut blocked = Vec::new();
        let mut cols = None;
        let mut rows = 0;

        for (row, line) in text.trim().lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut width = 0;
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    BLOCKED_CHAR => blocked.push(true),
                    FREE_CHAR => blocked.push(false),
                    _ => return Err(GridError::InvalidChar { ch, row, col }),
                }
                width += 1;
            }
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(GridError::InconsistentWidth {
                        line: row,
                        expected,
                        found: width,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let cols = cols.unwrap_or(0);
        let dims = Dims::new(rows, cols);
        if dims.is_empty() {
            return Err(GridError::EmptyDimension { rows, cols });
        }
        Ok(Self { dims, blocked })
    }

    /// The grid bounds.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Whether `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.dims.contains(cell)
    }

    /// Whether `cell` is blocked. Cells outside the grid count as blocked.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.dims.index(cell).is_none_or(|i| self.blocked[i])
    }

    /// Whether `cell` is inside the grid and not blocked.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Mark `cell` as blocked or free.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> Result<(), GridError> {
        let i = self.dims.index(cell).ok_or(GridError::OutOfBounds {
            cell,
            dims: self.dims,
        })?;
        self.blocked[i] = blocked;
        Ok(())
    }

    /// Remove every obstacle.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Row-major iterator over `(Cell, blocked)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.dims.iter().zip(self.blocked.iter().copied())
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.blocked.chunks(self.dims.cols).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &b in line {
                let ch = if b { BLOCKED_CHAR } else { FREE_CHAR };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for ObstacleGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLED: &str = "\
.....
.###.
.#.#.
.###.
.....";

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            ObstacleGrid::new(0, 3),
            Err(GridError::EmptyDimension { rows: 0, cols: 3 })
        );
        assert!(ObstacleGrid::new(1, 0).is_err());
        assert!(ObstacleGrid::new(1, 1).is_ok());
    }

    #[test]
    fn new_rejects_oversized_dimensions() {
        assert_eq!(
            ObstacleGrid::new(usize::MAX, 2),
            Err(GridError::TooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
        // the product fits in usize but not in an allocation
        let rows = isize::MAX as usize + 1;
        assert_eq!(
            ObstacleGrid::new(rows, 1),
            Err(GridError::TooLarge { rows, cols: 1 })
        );
    }

    #[test]
    fn set_and_query() {
        let mut g = ObstacleGrid::new(3, 4).unwrap();
        g.set_blocked(Cell::new(1, 2), true).unwrap();
        assert!(g.is_blocked(Cell::new(1, 2)));
        assert!(g.is_free(Cell::new(2, 2)));
        assert_eq!(g.blocked_count(), 1);
        // out of bounds counts as blocked
        assert!(g.is_blocked(Cell::new(3, 0)));
        assert!(g.set_blocked(Cell::new(0, 4), true).is_err());
        g.clear();
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn parse_and_display() {
        let g = ObstacleGrid::parse(WALLED).unwrap();
        assert_eq!(g.dims(), Dims::new(5, 5));
        assert_eq!(g.blocked_count(), 8);
        assert!(g.is_blocked(Cell::new(1, 1)));
        assert!(g.is_free(Cell::new(2, 2)));
        assert_eq!(g.to_string(), WALLED);
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = ObstacleGrid::parse("...\n..\n...").unwrap_err();
        assert_eq!(
            err,
            GridError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_chars() {
        let err = ObstacleGrid::parse("..\n.x").unwrap_err();
        assert_eq!(err, GridError::InvalidChar { ch: 'x', row: 1, col: 1 });
        assert!(ObstacleGrid::parse("   \n  ").is_err());
    }

    #[test]
    fn with_obstacles_and_iter() {
        let g = ObstacleGrid::with_obstacles(2, 2, [Cell::new(0, 1)]).unwrap();
        let cells: Vec<_> = g.iter().collect();
        assert_eq!(
            cells,
            vec![
                (Cell::new(0, 0), false),
                (Cell::new(0, 1), true),
                (Cell::new(1, 0), false),
                (Cell::new(1, 1), false),
            ]
        );
    }
}
