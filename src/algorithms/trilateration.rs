//! Closed-form trilateration over exactly three ranged anchors
//!
//! Two independent formulations are kept deliberately: the linearized
//! Cramer's-rule solve seeds the iterative multilateration path, while the
//! axis-projection solve serves the exactly-three-anchor path. They agree
//! to floating-point tolerance on well-conditioned inputs but fail
//! differently near degeneracy (zero determinant vs. negative discriminant
//! or near-zero perpendicular offset).

use crate::core::{Point, RangedAnchor, COLLINEARITY_EPSILON, SINGULARITY_EPSILON};
use nalgebra::{Matrix2, Vector2};

/// Trilaterate by linearizing the three circle equations.
///
/// Subtracting the first circle equation from the other two yields a 2x2
/// linear system solved with Cramer's rule. Returns `None` for fewer than
/// three anchors or when the system is singular (collinear or coincident
/// anchors) — an unsolvable-geometry outcome, not a fault.
pub fn trilaterate_linear(anchors: &[RangedAnchor]) -> Option<Point> {
    if anchors.len() < 3 {
        return None;
    }

    let (p1, r1) = (anchors[0].position, anchors[0].distance);
    let (p2, r2) = (anchors[1].position, anchors[1].distance);
    let (p3, r3) = (anchors[2].position, anchors[2].distance);

    let coefficients = Matrix2::new(
        2.0 * (p2.x - p1.x),
        2.0 * (p2.y - p1.y),
        2.0 * (p3.x - p1.x),
        2.0 * (p3.y - p1.y),
    );
    let rhs = Vector2::new(
        r1 * r1 - r2 * r2 - p1.x * p1.x + p2.x * p2.x - p1.y * p1.y + p2.y * p2.y,
        r1 * r1 - r3 * r3 - p1.x * p1.x + p3.x * p3.x - p1.y * p1.y + p3.y * p3.y,
    );

    let det = coefficients.determinant();
    if det.abs() < SINGULARITY_EPSILON {
        return None;
    }

    let x = Matrix2::from_columns(&[rhs, coefficients.column(1).into_owned()]).determinant() / det;
    let y = Matrix2::from_columns(&[coefficients.column(0).into_owned(), rhs]).determinant() / det;

    Some(Point::new(x, y))
}

/// Trilaterate by projecting anchor 3 onto the axis through anchors 1 and 2.
///
/// Returns `None` when anchors 1 and 2 coincide, when the distance triple
/// is geometrically impossible (negative value under the square root), or
/// when the perpendicular offset is below the collinearity threshold.
pub fn trilaterate_geometric(anchors: &[RangedAnchor]) -> Option<Point> {
    if anchors.len() < 3 {
        return None;
    }

    let (p1, r1) = (anchors[0].position, anchors[0].distance);
    let (p2, r2) = (anchors[1].position, anchors[1].distance);
    let (p3, r3) = (anchors[2].position, anchors[2].distance);

    let d = p1.distance(&p2);
    if d == 0.0 {
        return None;
    }

    // Unit vector along the anchor1 -> anchor2 axis
    let ex = Point::new((p2.x - p1.x) / d, (p2.y - p1.y) / d);

    let to_third = p3 - p1;
    let i = ex.dot(&to_third);
    let j_squared = to_third.dot(&to_third) - i * i;
    if j_squared < 0.0 {
        return None;
    }
    let j = j_squared.sqrt();
    if j.abs() < COLLINEARITY_EPSILON {
        return None;
    }

    // Perpendicular unit vector completing the local frame
    let ey = Point::new((to_third.x - i * ex.x) / j, (to_third.y - i * ex.y) / j);

    let x = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let y = (r1 * r1 - r3 * r3 + i * i + j * j) / (2.0 * j) - (i / j) * x;

    Some(Point::new(
        p1.x + x * ex.x + y * ey.x,
        p1.y + x * ex.y + y * ey.y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranged(x: f64, y: f64, truth: Point) -> RangedAnchor {
        let position = Point::new(x, y);
        RangedAnchor::new(position, position.distance(&truth))
    }

    #[test]
    fn test_linear_recovers_known_position() {
        let truth = Point::new(3.0, 4.0);
        let anchors = [
            ranged(0.0, 0.0, truth),
            ranged(10.0, 0.0, truth),
            ranged(0.0, 10.0, truth),
        ];
        let solved = trilaterate_linear(&anchors).unwrap();
        assert!(solved.distance(&truth) < 1e-6);
    }

    #[test]
    fn test_geometric_recovers_known_position() {
        let truth = Point::new(3.0, 4.0);
        let anchors = [
            ranged(0.0, 0.0, truth),
            ranged(10.0, 0.0, truth),
            ranged(0.0, 10.0, truth),
        ];
        let solved = trilaterate_geometric(&anchors).unwrap();
        assert!(solved.distance(&truth) < 1e-6);
    }

    #[test]
    fn test_formulations_agree_on_well_conditioned_input() {
        let truth = Point::new(6.5, 2.25);
        let anchors = [
            ranged(1.0, 1.0, truth),
            ranged(12.0, 0.5, truth),
            ranged(4.0, 9.0, truth),
        ];
        let linear = trilaterate_linear(&anchors).unwrap();
        let geometric = trilaterate_geometric(&anchors).unwrap();
        assert!(linear.distance(&geometric) < 1e-6);
    }

    #[test]
    fn test_collinear_anchors_rejected_by_both() {
        let anchors = [
            RangedAnchor::new(Point::new(0.0, 0.0), 2.0),
            RangedAnchor::new(Point::new(5.0, 0.0), 3.0),
            RangedAnchor::new(Point::new(10.0, 0.0), 7.0),
        ];
        assert!(trilaterate_linear(&anchors).is_none());
        assert!(trilaterate_geometric(&anchors).is_none());
    }

    #[test]
    fn test_coincident_first_pair_rejected() {
        let anchors = [
            RangedAnchor::new(Point::new(2.0, 2.0), 1.0),
            RangedAnchor::new(Point::new(2.0, 2.0), 1.5),
            RangedAnchor::new(Point::new(8.0, 3.0), 4.0),
        ];
        assert!(trilaterate_geometric(&anchors).is_none());
        assert!(trilaterate_linear(&anchors).is_none());
    }

    #[test]
    fn test_near_collinear_third_anchor_rejected() {
        // The third anchor sits just off the axis through the first two,
        // under the perpendicular-offset threshold
        let anchors = [
            RangedAnchor::new(Point::new(0.0, 0.0), 1.0),
            RangedAnchor::new(Point::new(10.0, 0.0), 1.0),
            RangedAnchor::new(Point::new(5.0, 1e-7), 1.0),
        ];
        assert!(trilaterate_geometric(&anchors).is_none());
    }

    #[test]
    fn test_fewer_than_three_anchors_rejected() {
        let anchors = [
            RangedAnchor::new(Point::new(0.0, 0.0), 1.0),
            RangedAnchor::new(Point::new(4.0, 0.0), 3.0),
        ];
        assert!(trilaterate_linear(&anchors).is_none());
        assert!(trilaterate_geometric(&anchors).is_none());
    }
}
