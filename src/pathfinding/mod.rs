//! Route search over way-point graphs and occupancy grids

pub mod astar;
pub mod graph;
pub mod grid;

pub use astar::{find_graph_path, find_grid_path, path_length};
pub use graph::{NodeId, WaypointGraph, WaypointNode};
pub use grid::{GridCell, OccupancyGrid};
