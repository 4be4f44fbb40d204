//! Grid-based navigation for map-backed scenes
//!
//! A floor is described by a square occupancy grid. Free cells are eroded to
//! keep agents away from obstacles, then joined into an 8-connected graph
//! over the largest connected region, which answers shortest-path queries
//! with A*.

mod grid;
mod graph;

pub use grid::{Cell, MapError, MapFrame, OccupancyGrid};
pub use graph::NavGraph;
