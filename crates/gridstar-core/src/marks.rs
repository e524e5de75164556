//! Display overlay for a finished search.
//!
//! A [`MarkedGrid`] copies the obstacle layout of an [`ObstacleGrid`] and
//! lets a front end paint the cells a search expanded, the path it found and
//! its endpoints. Stronger marks win: endpoints over path, path over
//! expanded; obstacles are never overwritten.

use std::fmt;
use std::io::{self, Write};

use crate::geom::{Cell, Dims};
use crate::grid::ObstacleGrid;

/// What a cell shows in a rendered or exported search result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    #[default]
    Free,
    Obstacle,
    Expanded,
    Path,
    Start,
    Goal,
}

impl Mark {
    /// Numeric code written by [`MarkedGrid::write_matrix`].
    pub const fn code(self) -> u8 {
        match self {
            Mark::Free => 0,
            Mark::Expanded => 25,
            Mark::Obstacle => 50,
            Mark::Path | Mark::Start | Mark::Goal => 100,
        }
    }

    /// Single-character glyph used by the `Display` impl.
    pub const fn glyph(self) -> char {
        match self {
            Mark::Free => '.',
            Mark::Obstacle => '#',
            Mark::Expanded => '~',
            Mark::Path => '*',
            Mark::Start => 'S',
            Mark::Goal => 'G',
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Mark::Free => 0,
            Mark::Expanded => 1,
            Mark::Path => 2,
            Mark::Start | Mark::Goal => 3,
            Mark::Obstacle => 4,
        }
    }
}

/// Obstacle layout plus search markings, ready for display or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedGrid {
    dims: Dims,
    marks: Vec<Mark>,
}

impl MarkedGrid {
    /// Start from the obstacle layout of `grid`.
    pub fn new(grid: &ObstacleGrid) -> Self {
        let marks = grid
            .iter()
            .map(|(_, blocked)| if blocked { Mark::Obstacle } else { Mark::Free })
            .collect();
        Self {
            dims: grid.dims(),
            marks,
        }
    }

    /// The grid bounds.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Mark at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        self.dims.index(cell).map(|i| self.marks[i])
    }

    /// Paint `mark` on `cell` unless a stronger mark is already there.
    /// Cells outside the grid are ignored.
    pub fn mark(&mut self, cell: Cell, mark: Mark) {
        if let Some(i) = self.dims.index(cell) {
            if mark.rank() >= self.marks[i].rank() {
                self.marks[i] = mark;
            }
        }
    }

    /// Paint every expanded cell.
    pub fn mark_expanded<'a>(&mut self, cells: impl IntoIterator<Item = &'a Cell>) -> &mut Self {
        for &c in cells {
            self.mark(c, Mark::Expanded);
        }
        self
    }

    /// Paint a path; its first and last cells become the start and goal.
    pub fn mark_path(&mut self, path: &[Cell]) -> &mut Self {
        for &c in path {
            self.mark(c, Mark::Path);
        }
        if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
            self.mark_endpoints(first, last);
        }
        self
    }

    /// Paint the start and goal cells.
    pub fn mark_endpoints(&mut self, start: Cell, goal: Cell) -> &mut Self {
        self.mark(start, Mark::Start);
        self.mark(goal, Mark::Goal);
        self
    }

    /// Number of cells carrying `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.marks.iter().filter(|&&m| m == mark).count()
    }

    /// Row-major rows of marks.
    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.marks.chunks(self.dims.cols.max(1))
    }

    /// Numeric matrix (see [`Mark::code`]), one inner `Vec` per row.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|m| m.code()).collect())
            .collect()
    }

    /// Write the numeric matrix as whitespace-separated rows, one row per
    /// line, suitable for loading into an external plotting tool.
    pub fn write_matrix<W: Write>(&self, mut out: W) -> io::Result<()> {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|m| m.code().to_string()).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        out.flush()
    }
}

impl fmt::Display for MarkedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for m in row {
                write!(f, "{}", m.glyph())?;
            }
        }
        Ok(())
    }
}
