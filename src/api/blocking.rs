//! Blocking positioning and routing facade

use crate::algorithms::multilateration::PositionSolver;
use crate::algorithms::quality::FixQuality;
use crate::api::types::{ApiError, ApiResult, BeaconReading, LocationFix, RouteSummary};
use crate::core::{Anchor, Point, RangedAnchor, Sample};
use crate::pathfinding::astar::{find_graph_path, find_grid_path, path_length};
use crate::pathfinding::graph::WaypointGraph;
use crate::pathfinding::grid::{GridCell, OccupancyGrid};
use crate::processing::filter_bank::FilterBank;
use crate::processing::signal_model::estimate_distance;
use crate::utils::config::EngineConfig;
use crate::validation::data::{validate_anchor_set, ValidationResult};
use log::debug;
use std::collections::HashMap;

/// One positioning session over a fixed anchor deployment.
///
/// The engine owns its per-anchor filter state, so concurrent sessions
/// each construct their own engine; anchors and spatial models are shared
/// immutably from outside. Every call is a bounded synchronous
/// computation — no I/O, no suspension.
#[derive(Debug)]
pub struct PositioningEngine {
    config: EngineConfig,
    anchors: HashMap<String, Anchor>,
    filters: FilterBank,
}

/// Geometric minimum for a 2D fix
const REQUIRED_ANCHORS: usize = 3;

impl PositioningEngine {
    pub fn new(config: EngineConfig) -> Self {
        let filters = FilterBank::new(
            config.filter.strategy,
            config.filter.window_size,
            config.filter.kalman(),
        );
        Self {
            config,
            anchors: HashMap::new(),
            filters,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Register a fixed anchor; a previous anchor with the same id is
    /// replaced
    pub fn register_anchor(&mut self, anchor: Anchor) {
        self.anchors.insert(anchor.id.clone(), anchor);
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Drop all per-anchor filter state, e.g. when the user restarts a
    /// scanning session
    pub fn reset_filters(&mut self) {
        self.filters.reset();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assess the registered anchor deployment for layout problems
    /// (duplicates, collinearity, tight spacing) without failing on them
    pub fn validate_deployment(&self) -> ValidationResult {
        let mut anchors: Vec<Anchor> = self.anchors.values().cloned().collect();
        anchors.sort_by(|a, b| a.id.cmp(&b.id));
        validate_anchor_set(&anchors)
    }

    /// Estimate the current position from one batch of beacon readings.
    ///
    /// Readings for unregistered beacons are skipped permissively; the
    /// remaining readings run through the signal model and the session's
    /// filters before solving. Errors only report why no fix is available:
    /// too few usable readings, or unsolvable geometry.
    pub fn locate(&mut self, readings: &[BeaconReading]) -> ApiResult<LocationFix> {
        let mut ranged = Vec::with_capacity(readings.len());

        for reading in readings {
            let anchor = match self.anchors.get(&reading.id) {
                Some(anchor) => anchor,
                None => {
                    debug!("[Engine] skipping reading from unknown beacon '{}'", reading.id);
                    continue;
                }
            };

            let reference_power = reading.tx_power.unwrap_or(anchor.reference_power);
            let raw_distance = estimate_distance(
                reading.rssi,
                reference_power,
                self.config.signal.path_loss_exponent,
            );
            let smoothed = self.filters.update(&reading.id, raw_distance);
            ranged.push(RangedAnchor::new(anchor.position, smoothed));
        }

        if ranged.len() < REQUIRED_ANCHORS {
            return Err(ApiError::InsufficientAnchors {
                available: ranged.len(),
                required: REQUIRED_ANCHORS,
            });
        }

        let solver = PositionSolver::with_iterations(self.config.solver.refinement_iterations);
        let estimate = solver.solve(&ranged).ok_or(ApiError::DegenerateGeometry)?;

        let residual = estimate.accuracy.unwrap_or(0.0);
        Ok(LocationFix {
            position: estimate.point(),
            accuracy: estimate.accuracy,
            quality: FixQuality::from_residual(residual),
            anchors_used: ranged.len(),
        })
    }

    /// `locate` over raw samples from the acquisition layer
    pub fn locate_from_samples(&mut self, samples: &[Sample]) -> ApiResult<LocationFix> {
        let readings: Vec<BeaconReading> = samples.iter().map(BeaconReading::from).collect();
        self.locate(&readings)
    }

    /// Route between two free positions over a way-point graph.
    ///
    /// An unreachable goal or an empty graph yields an empty route, which
    /// callers detect via `is_reachable`.
    pub fn route_on_graph(&self, graph: &WaypointGraph, start: Point, goal: Point) -> RouteSummary {
        let points = find_graph_path(graph, start, goal);
        self.summarize(points)
    }

    /// Route between two cells of an occupancy grid.
    ///
    /// Cell coordinates map to route positions as (col, row); cells are
    /// unit-sized.
    pub fn route_on_grid(
        &self,
        grid: &OccupancyGrid,
        start: GridCell,
        goal: GridCell,
    ) -> RouteSummary {
        let points = find_grid_path(grid, start, goal)
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| Point::new(cell.col as f64, cell.row as f64))
                    .collect()
            })
            .unwrap_or_default();
        self.summarize(points)
    }

    fn summarize(&self, points: Vec<Point>) -> RouteSummary {
        let distance = path_length(&points);
        RouteSummary {
            estimated_time_s: distance / self.config.route.walking_speed_ms,
            distance,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Square deployment with the reference position at its center
    fn engine_with_square_deployment() -> PositioningEngine {
        let mut engine = PositioningEngine::with_defaults();
        engine.register_anchor(Anchor::new("a", Point::new(0.0, 0.0), -59));
        engine.register_anchor(Anchor::new("b", Point::new(10.0, 0.0), -59));
        engine.register_anchor(Anchor::new("c", Point::new(0.0, 10.0), -59));
        engine.register_anchor(Anchor::new("d", Point::new(10.0, 10.0), -59));
        engine
    }

    /// RSSI that the log-distance model maps back to `distance` with the
    /// default exponent
    fn rssi_for_distance(distance: f64, reference_power: i32) -> i32 {
        reference_power - (20.0 * distance.log10()).round() as i32
    }

    #[test]
    fn test_locate_with_exact_readings() {
        let mut engine = engine_with_square_deployment();
        // Center of the square: each anchor is sqrt(50) away
        let d = 50f64.sqrt();
        let rssi = rssi_for_distance(d, -59);
        let readings = vec![
            BeaconReading::new("a", rssi),
            BeaconReading::new("b", rssi),
            BeaconReading::new("c", rssi),
            BeaconReading::new("d", rssi),
        ];

        // Drive repeated batches so the Kalman filters converge on the
        // steady readings before judging the fix
        let mut fix = None;
        for _ in 0..40 {
            fix = Some(engine.locate(&readings));
        }
        let fix = fix.unwrap().unwrap();
        assert!(fix.position.distance(&Point::new(5.0, 5.0)) < 0.5);
        assert_eq!(fix.anchors_used, 4);
    }

    #[test]
    fn test_unknown_beacons_are_skipped() {
        let mut engine = engine_with_square_deployment();
        let readings = vec![
            BeaconReading::new("a", -70),
            BeaconReading::new("ghost", -50),
            BeaconReading::new("b", -70),
        ];
        let result = engine.locate(&readings);
        assert_eq!(
            result,
            Err(ApiError::InsufficientAnchors {
                available: 2,
                required: 3,
            })
        );
    }

    #[test]
    fn test_collinear_deployment_reports_degenerate() {
        let mut engine = PositioningEngine::with_defaults();
        engine.register_anchor(Anchor::new("a", Point::new(0.0, 0.0), -59));
        engine.register_anchor(Anchor::new("b", Point::new(5.0, 0.0), -59));
        engine.register_anchor(Anchor::new("c", Point::new(10.0, 0.0), -59));
        let readings = vec![
            BeaconReading::new("a", -65),
            BeaconReading::new("b", -65),
            BeaconReading::new("c", -65),
        ];
        assert_eq!(engine.locate(&readings), Err(ApiError::DegenerateGeometry));
    }

    #[test]
    fn test_locate_from_samples() {
        let mut engine = engine_with_square_deployment();
        let samples: Vec<Sample> = ["a", "b", "c"]
            .iter()
            .map(|id| Sample {
                anchor_id: id.to_string(),
                rssi: -70,
                timestamp_ms: 0,
            })
            .collect();
        assert!(engine.locate_from_samples(&samples).is_ok());
    }

    #[test]
    fn test_route_on_graph_summary() {
        let engine = PositioningEngine::with_defaults();
        let mut graph = WaypointGraph::new();
        graph.insert_node(1, Point::new(0.0, 0.0));
        graph.insert_node(2, Point::new(3.0, 4.0));
        graph.connect(1, 2);

        let route = engine.route_on_graph(&graph, Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!(route.is_reachable());
        assert!((route.distance - 5.0).abs() < 1e-9);
        assert!((route.estimated_time_s - 5.0 / 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_route_on_grid_summary() {
        let engine = PositioningEngine::with_defaults();
        let grid = OccupancyGrid::open(3, 3);
        let route = engine.route_on_grid(&grid, GridCell::new(0, 0), GridCell::new(0, 2));
        assert!(route.is_reachable());
        assert_eq!(route.points.len(), 3);
        assert!((route.distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreachable_route_is_empty() {
        let engine = PositioningEngine::with_defaults();
        let mut grid = OccupancyGrid::open(3, 3);
        grid.set_wall(GridCell::new(0, 1));
        grid.set_wall(GridCell::new(1, 1));
        grid.set_wall(GridCell::new(2, 1));
        let route = engine.route_on_grid(&grid, GridCell::new(0, 0), GridCell::new(0, 2));
        assert!(!route.is_reachable());
        assert_eq!(route.distance, 0.0);
    }

    #[test]
    fn test_deployment_assessment() {
        let engine = engine_with_square_deployment();
        assert!(engine.validate_deployment().is_valid);

        let mut collinear = PositioningEngine::with_defaults();
        collinear.register_anchor(Anchor::new("a", Point::new(0.0, 0.0), -59));
        collinear.register_anchor(Anchor::new("b", Point::new(5.0, 0.0), -59));
        collinear.register_anchor(Anchor::new("c", Point::new(10.0, 0.0), -59));
        let result = collinear.validate_deployment();
        assert!(result.is_valid);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_reset_filters_clears_session_state() {
        let mut engine = engine_with_square_deployment();
        let readings = vec![
            BeaconReading::new("a", -70),
            BeaconReading::new("b", -70),
            BeaconReading::new("c", -70),
        ];
        let _ = engine.locate(&readings);
        engine.reset_filters();
        // A fresh session converges identically to the first one
        let first = engine.locate(&readings).unwrap();
        engine.reset_filters();
        let second = engine.locate(&readings).unwrap();
        assert_eq!(first, second);
    }
}
