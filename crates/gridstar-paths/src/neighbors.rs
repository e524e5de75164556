use gridstar_core::{Cell, Dims, ObstacleGrid};

/// Reusable neighbor computation helper.
///
/// Produces the cells of the 3x3 block around a cell, minus the cell itself
/// and anything outside the grid: 3 for a corner, 5 along an edge, 8 in the
/// interior. Obstacles are not considered here; see [`filter_obstacles`].
#[derive(Debug, Clone)]
pub struct Neighbors {
    buf: Vec<Cell>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// 8-directional neighbors of `cell` clipped to `dims`, in row-major
    /// order.
    pub fn all(&mut self, cell: Cell, dims: Dims) -> &[Cell] {
        self.buf.clear();
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(n) = cell.offset(dr, dc).filter(|&n| dims.contains(n)) {
                    self.buf.push(n);
                }
            }
        }
        &self.buf
    }

    /// Neighbors of `cell` on `grid` that are not blocked.
    pub fn free(&mut self, cell: Cell, grid: &ObstacleGrid) -> &[Cell] {
        self.all(cell, grid.dims());
        filter_obstacles(grid, &mut self.buf);
        &self.buf
    }
}

/// Drop every blocked cell from `cells`, keeping the order of the rest.
pub fn filter_obstacles(grid: &ObstacleGrid, cells: &mut Vec<Cell>) {
    cells.retain(|&c| grid.is_free(c));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_classes() {
        let dims = Dims::new(5, 5);
        let mut nb = Neighbors::new();
        let count = |nb: &mut Neighbors, r, c| nb.all(Cell::new(r, c), dims).len();
        // corners
        assert_eq!(count(&mut nb, 0, 0), 3);
        assert_eq!(count(&mut nb, 0, 4), 3);
        assert_eq!(count(&mut nb, 4, 0), 3);
        assert_eq!(count(&mut nb, 4, 4), 3);
        // edges
        assert_eq!(count(&mut nb, 0, 2), 5);
        assert_eq!(count(&mut nb, 2, 0), 5);
        assert_eq!(count(&mut nb, 4, 2), 5);
        assert_eq!(count(&mut nb, 2, 4), 5);
        // interior
        assert_eq!(count(&mut nb, 2, 2), 8);
    }

    #[test]
    fn corner_neighbors_exact() {
        let mut nb = Neighbors::new();
        assert_eq!(
            nb.all(Cell::ORIGIN, Dims::new(5, 5)),
            &[Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn degenerate_grids() {
        let mut nb = Neighbors::new();
        assert!(nb.all(Cell::ORIGIN, Dims::new(1, 1)).is_empty());
        assert_eq!(nb.all(Cell::new(0, 2), Dims::new(1, 5)).len(), 2);
        assert_eq!(nb.all(Cell::new(3, 0), Dims::new(4, 1)), &[Cell::new(2, 0)]);
    }

    #[test]
    fn obstacle_filter_is_separate() {
        let grid = ObstacleGrid::parse("#..\n.#.\n...").unwrap();
        let mut nb = Neighbors::new();
        // generation ignores obstacles
        assert_eq!(nb.all(Cell::new(0, 1), grid.dims()).len(), 5);
        let free = nb.free(Cell::new(0, 1), &grid).to_vec();
        assert_eq!(
            free,
            vec![Cell::new(0, 2), Cell::new(1, 0), Cell::new(1, 2)]
        );
    }
}
