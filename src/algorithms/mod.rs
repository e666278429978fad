pub mod a_star;
pub mod common;
pub mod dfo;

pub use a_star::{AStar, Heuristic, SearchNode};
pub use common::PathfindingAlgorithm;
pub use dfo::{Dfo, DfoConfig, Fly, SearchOutcome};
