//! Obstacle layouts for gridstar grids: empty maps, column- and row-wise
//! snakes, randomly scattered obstacles and hand-placed ones.

pub mod layout;

pub use layout::{GenError, Layout, LayoutGen, column_snake, row_snake};
