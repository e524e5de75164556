use gridstar_core::Cell;

/// Straight-line (L2) distance between two cells.
#[inline]
pub fn euclidean(a: Cell, b: Cell) -> f64 {
    let (dr, dc) = a.delta(b);
    (dr as f64).hypot(dc as f64)
}

/// Octile distance: the length of the shortest 8-connected path on an empty
/// grid, taking diagonal steps first.
#[inline]
pub fn octile(a: Cell, b: Cell) -> f64 {
    let (dr, dc) = a.delta(b);
    let (lo, hi) = (dr.min(dc) as f64, dr.max(dc) as f64);
    std::f64::consts::SQRT_2 * lo + (hi - lo)
}

/// Cost of moving between two adjacent cells: 1 orthogonally, √2 diagonally.
#[inline]
pub fn step_cost(a: Cell, b: Cell) -> f64 {
    euclidean(a, b)
}
