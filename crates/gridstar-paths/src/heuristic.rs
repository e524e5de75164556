//! Remaining-cost estimates that guide the search.

use gridstar_core::Cell;

use crate::distance::{euclidean, octile};

/// Scale applied by the default heuristic.
pub const DEFAULT_SCALE: f64 = 1.4;

/// Estimate of the cost still to pay from `from` to `to`.
///
/// The search loop only ever calls [`estimate`](Heuristic::estimate), so any
/// implementation can be swapped in without touching it. An estimate that
/// never exceeds the true remaining cost (admissible) guarantees the
/// returned path is a shortest one.
pub trait Heuristic {
    fn estimate(&self, from: Cell, to: Cell) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Cell, Cell) -> f64,
{
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self(from, to)
    }
}

/// Straight-line distance multiplied by `scale`.
///
/// The default scale of [`DEFAULT_SCALE`] overestimates, which makes the
/// heuristic inadmissible: the search expands fewer cells but may return a
/// path slightly longer than the shortest one. Use
/// [`ScaledEuclidean::admissible`] (or [`Euclidean`]) when optimal paths are
/// required.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaledEuclidean {
    pub scale: f64,
}

impl ScaledEuclidean {
    pub const fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Unscaled straight-line distance.
    pub const fn admissible() -> Self {
        Self { scale: 1.0 }
    }
}

impl Default for ScaledEuclidean {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl Heuristic for ScaledEuclidean {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self.scale * euclidean(from, to)
    }
}

/// Plain straight-line distance. Admissible.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        euclidean(from, to)
    }
}

/// Octile distance multiplied by `scale`. Admissible for `scale <= 1`, and
/// tighter than [`Euclidean`] on 8-connected grids.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octile {
    pub scale: f64,
}

impl Octile {
    pub const fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub const fn admissible() -> Self {
        Self { scale: 1.0 }
    }
}

impl Default for Octile {
    fn default() -> Self {
        Self::admissible()
    }
}

impl Heuristic for Octile {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self.scale * octile(from, to)
    }
}

/// Configuration-friendly choice of heuristic.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum HeuristicKind {
    Euclidean { scale: f64 },
    Octile { scale: f64 },
    /// Always 0: the search degenerates to Dijkstra.
    Zero,
}

impl Default for HeuristicKind {
    fn default() -> Self {
        HeuristicKind::Euclidean {
            scale: DEFAULT_SCALE,
        }
    }
}

impl Heuristic for HeuristicKind {
    #[inline]
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        match *self {
            HeuristicKind::Euclidean { scale } => ScaledEuclidean::new(scale).estimate(from, to),
            HeuristicKind::Octile { scale } => Octile::new(scale).estimate(from, to),
            HeuristicKind::Zero => 0.0,
        }
    }
}
