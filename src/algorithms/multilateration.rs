//! Iterative multilateration for more than three anchors

use crate::algorithms::quality::rms_residual;
use crate::algorithms::trilateration::{trilaterate_geometric, trilaterate_linear};
use crate::core::{EstimatedPosition, Point, RangedAnchor, DEFAULT_REFINEMENT_ITERATIONS};
use log::{debug, trace};

/// Refine a seed estimate by weighted averaging of anchor positions.
///
/// Each round weights every anchor by how closely its reported distance
/// matches the distance implied by the current estimate, then moves the
/// estimate to the weight-normalized centroid. The round count is fixed
/// rather than convergence-checked, which bounds worst-case latency at the
/// cost of some precision.
pub fn refine(seed: Point, anchors: &[RangedAnchor], iterations: usize) -> Point {
    let mut estimate = seed;

    for round in 0..iterations {
        let mut weighted_x = 0.0;
        let mut weighted_y = 0.0;
        let mut total_weight = 0.0;

        for anchor in anchors {
            let computed = estimate.distance(&anchor.position);
            let weight = 1.0 / (1.0 + (computed - anchor.distance).abs());
            weighted_x += weight * anchor.position.x;
            weighted_y += weight * anchor.position.y;
            total_weight += weight;
        }

        estimate = Point::new(weighted_x / total_weight, weighted_y / total_weight);
        trace!(
            "[Multilateration] round {}: estimate=({:.3},{:.3})",
            round,
            estimate.x,
            estimate.y
        );
    }

    estimate
}

/// Position solver over an arbitrary number of ranged anchors.
///
/// Exactly three anchors take the closed-form path; more than three seed
/// the weighted refinement from the first three. Fewer than three is
/// underdetermined and yields `None`.
#[derive(Debug, Clone)]
pub struct PositionSolver {
    /// Refinement rounds for the more-than-three-anchor path
    pub refinement_iterations: usize,
}

impl Default for PositionSolver {
    fn default() -> Self {
        Self {
            refinement_iterations: DEFAULT_REFINEMENT_ITERATIONS,
        }
    }
}

impl PositionSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(refinement_iterations: usize) -> Self {
        Self {
            refinement_iterations,
        }
    }

    /// Solve for a best-estimate position.
    ///
    /// Exactly three anchors go through the axis-projection solver; more
    /// than three seed the refinement from the linearized solver over the
    /// first three. Returns `None` for underdetermined input (fewer than
    /// three anchors) or unsolvable geometry (collinear/coincident
    /// anchors). Reported distances are assumed positive; the solver does
    /// not validate them.
    pub fn solve(&self, anchors: &[RangedAnchor]) -> Option<EstimatedPosition> {
        if anchors.len() < 3 {
            debug!(
                "[PositionSolver] underdetermined: {} anchors, 3 required",
                anchors.len()
            );
            return None;
        }

        let solution = if anchors.len() == 3 {
            match trilaterate_geometric(anchors) {
                Some(point) => point,
                None => {
                    debug!("[PositionSolver] degenerate three-anchor geometry");
                    return None;
                }
            }
        } else {
            let seed = match trilaterate_linear(anchors) {
                Some(point) => point,
                None => {
                    debug!("[PositionSolver] degenerate seed geometry");
                    return None;
                }
            };
            refine(seed, anchors, self.refinement_iterations)
        };

        let accuracy = rms_residual(anchors, solution);
        Some(EstimatedPosition::with_accuracy(
            solution.x, solution.y, accuracy,
        ))
    }
}
