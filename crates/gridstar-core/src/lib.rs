//! **gridstar-core** — grid coordinates, obstacle maps and result overlays.
//!
//! This crate provides the foundational types shared across the *gridstar*
//! workspace: the [`Cell`] coordinate, grid bounds ([`Dims`]), the
//! [`ObstacleGrid`] the search runs on, and [`MarkedGrid`], an overlay used
//! by front ends to display or export a search outcome.

pub mod error;
pub mod geom;
pub mod grid;
pub mod marks;

pub use error::GridError;
pub use geom::{Cell, Dims, DimsIter};
pub use grid::ObstacleGrid;
pub use marks::{Mark, MarkedGrid};
