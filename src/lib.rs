//! Indoor Positioning and Wayfinding Engine
//!
//! Estimates a mobile user's 2D position from noisy beacon signal-strength
//! readings and computes traversable routes through way-point graphs or
//! occupancy grids. The engine is pure computation: collaborators supply
//! readings and spatial models and consume positions and paths.

pub mod algorithms;
pub mod api;
pub mod core;
pub mod pathfinding;
pub mod processing;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{Anchor, EstimatedPosition, Point, RangedAnchor, Sample};
pub use algorithms::{trilaterate_geometric, trilaterate_linear, FixQuality, PositionSolver};
pub use processing::{
    estimate_distance, estimate_distance_default, FilterBank, KalmanConfig, KalmanState,
    MovingAverageFilter, ScalarKalmanFilter, SmoothingStrategy,
};
pub use pathfinding::{
    find_graph_path, find_grid_path, path_length, GridCell, NodeId, OccupancyGrid, WaypointGraph,
};
pub use api::{
    formatter, ApiError, ApiResult, BeaconReading, LocationFix, OutputFormat, OutputFormatter,
    PositioningEngine, RouteSummary,
};
pub use utils::{ConfigError, EngineConfig};
pub use validation::{validate_anchor_set, validate_ranged, ValidationResult};
