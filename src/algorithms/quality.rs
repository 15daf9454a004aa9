//! Fit-quality assessment for solved positions

use crate::core::{Point, RangedAnchor};
use serde::{Deserialize, Serialize};

/// RMS residual between reported distances and the distances implied by a
/// candidate position (meters). Zero residual means a perfect fit; `0.0`
/// is also returned for an empty anchor set.
pub fn rms_residual(anchors: &[RangedAnchor], position: Point) -> f64 {
    if anchors.is_empty() {
        return 0.0;
    }

    let sum_squared: f64 = anchors
        .iter()
        .map(|anchor| {
            let residual = position.distance(&anchor.position) - anchor.distance;
            residual * residual
        })
        .sum();

    (sum_squared / anchors.len() as f64).sqrt()
}

/// Coarse grade of a position fix, derived from the RMS range residual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixQuality {
    /// Residual under 0.5 m
    Excellent,
    /// Residual under 2 m
    Good,
    /// Residual under 5 m
    Acceptable,
    /// Residual of 5 m or more
    Poor,
}

impl FixQuality {
    pub fn from_residual(residual_m: f64) -> Self {
        if residual_m < 0.5 {
            FixQuality::Excellent
        } else if residual_m < 2.0 {
            FixQuality::Good
        } else if residual_m < 5.0 {
            FixQuality::Acceptable
        } else {
            FixQuality::Poor
        }
    }
}
