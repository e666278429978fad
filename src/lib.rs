//! Route finding on 2-D occupancy grids with two interchangeable engines:
//! an open/closed-list A* and a dispersive flies optimiser (DFO).

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod statistics;

pub use algorithms::a_star::find_path;
pub use algorithms::dfo::search;
pub use error::{GridSearchError, Result};
pub use grid::{Cell, Grid, Position};
