use crate::geom::{Cell, Dims};

/// Errors raised while building or editing an [`ObstacleGrid`](crate::ObstacleGrid).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be at least 1x1, got {rows}x{cols}")]
    EmptyDimension { rows: usize, cols: usize },

    /// The cell count does not fit in memory.
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    /// A map line does not match the width of the first line.
    #[error("map line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A map contains a character that is neither free nor blocked.
    #[error("invalid map character \u{201c}{ch}\u{201d} at ({row}, {col})")]
    InvalidChar { ch: char, row: usize, col: usize },

    /// A cell lies outside the grid.
    #[error("cell {cell} is outside a {dims} grid")]
    OutOfBounds { cell: Cell, dims: Dims },
}
