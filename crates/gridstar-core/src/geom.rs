//! Geometry primitives: [`Cell`] and [`Dims`].
//!
//! Cells are addressed as `(row, col)` with rows growing down and columns
//! growing right. Both coordinates are unsigned, so a cell can never sit at a
//! negative position; stepping off the top or left edge is expressed through
//! [`Cell::offset`] returning `None`.

use std::fmt;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. Identity is coordinate equality.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// The top-left cell (0, 0).
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Return the cell shifted by `(dr, dc)`, or `None` if either coordinate
    /// would become negative or overflow.
    #[inline]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Absolute row and column differences to `other`.
    #[inline]
    pub fn delta(self, other: Cell) -> (usize, usize) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }

    /// Chebyshev (L∞) distance: the number of king moves between two cells.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> usize {
        let (dr, dc) = self.delta(other);
        dr.max(dc)
    }

    /// Whether `other` is one of the eight cells around `self`.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.chebyshev(other) == 1
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Grid bounds: cells `[0, rows) x [0, cols)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    /// Create new bounds.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells, saturating at `usize::MAX`.
    #[inline]
    pub const fn len(self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Whether either dimension is zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `cell` lies inside the bounds.
    #[inline]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major flat index of `cell`, or `None` if it is out of bounds.
    #[inline]
    pub fn index(self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }

    /// Inverse of [`index`](Self::index). The index must be `< len()`.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        Cell::new(idx / self.cols, idx % self.cols)
    }

    /// The bottom-right cell, if the bounds are non-empty.
    #[inline]
    pub fn last(self) -> Option<Cell> {
        (!self.is_empty()).then(|| Cell::new(self.rows - 1, self.cols - 1))
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> DimsIter {
        DimsIter { dims: self, next: 0 }
    }
}

impl IntoIterator for Dims {
    type Item = Cell;
    type IntoIter = DimsIter;
    #[inline]
    fn into_iter(self) -> DimsIter {
        self.iter()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// DimsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the cells in a [`Dims`].
#[derive(Clone, Debug)]
pub struct DimsIter {
    dims: Dims,
    next: usize,
}

impl Iterator for DimsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.dims.len() {
            return None;
        }
        let cell = self.dims.cell(self.next);
        self.next += 1;
        Some(cell)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dims.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DimsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_offset_clips_at_zero() {
        let c = Cell::new(0, 3);
        assert_eq!(c.offset(-1, 0), None);
        assert_eq!(c.offset(1, -1), Some(Cell::new(1, 2)));
        assert_eq!(Cell::ORIGIN.offset(0, -1), None);
    }

    #[test]
    fn cell_adjacency() {
        let c = Cell::new(2, 2);
        assert!(c.is_adjacent(Cell::new(1, 1)));
        assert!(c.is_adjacent(Cell::new(2, 3)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(4, 2)));
        assert_eq!(c.chebyshev(Cell::new(5, 0)), 3);
    }

    #[test]
    fn cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn dims_index_round_trip() {
        let d = Dims::new(3, 4);
        assert_eq!(d.len(), 12);
        assert_eq!(d.index(Cell::new(2, 1)), Some(9));
        assert_eq!(d.cell(9), Cell::new(2, 1));
        assert_eq!(d.index(Cell::new(3, 0)), None);
        assert_eq!(d.index(Cell::new(0, 4)), None);
        assert_eq!(d.last(), Some(Cell::new(2, 3)));
        assert_eq!(Dims::new(usize::MAX, 2).len(), usize::MAX);
    }

    #[test]
    fn dims_iter_count() {
        let d = Dims::new(2, 3);
        let cells: Vec<_> = d.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(1, 2));
        assert_eq!(d.iter().len(), 6);
        assert_eq!(Dims::new(0, 5).iter().count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Cell::new(4, 7).to_string(), "(4, 7)");
        assert_eq!(Dims::new(5, 6).to_string(), "5x6");
    }
}
