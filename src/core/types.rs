//! Core data types for positioning and wayfinding

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2D position in local floor-plan coordinates (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance (avoids the sqrt when only comparing)
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Dot product with another point treated as a vector
    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z-component of the 3D cross product of two vectors
    #[inline]
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Fixed beacon with a calibrated reference transmit power.
/// Created at configuration time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Unique beacon identifier (UUID or deployment label)
    pub id: String,
    /// Installed position in floor-plan coordinates
    pub position: Point,
    /// Measured RSSI at the 1 m reference distance (dBm)
    pub reference_power: i32,
}

impl Anchor {
    pub fn new(id: impl Into<String>, position: Point, reference_power: i32) -> Self {
        Self {
            id: id.into(),
            position,
            reference_power,
        }
    }
}

/// One raw signal-strength reading off an anchor.
/// Ephemeral: consumed by the filter pipeline immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Identifier of the anchor this reading came from
    pub anchor_id: String,
    /// Received signal strength (dBm); 0 is the out-of-range sentinel
    pub rssi: i32,
    /// Reading timestamp (milliseconds since epoch)
    pub timestamp_ms: u64,
}

/// An anchor position paired with its smoothed distance estimate.
/// Input unit of the position solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedAnchor {
    pub position: Point,
    pub distance: f64,
}

impl RangedAnchor {
    pub fn new(position: Point, distance: f64) -> Self {
        Self { position, distance }
    }
}

/// Terminal output of the localization pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedPosition {
    pub x: f64,
    pub y: f64,
    /// RMS range residual at the solution (meters), when computable
    pub accuracy: Option<f64>,
}

impl EstimatedPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            accuracy: None,
        }
    }

    pub fn with_accuracy(x: f64, y: f64, accuracy: f64) -> Self {
        Self {
            x,
            y,
            accuracy: Some(accuracy),
        }
    }

    /// The estimate as a plain point
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_vector_ops() {
        let e1 = Point::new(1.0, 0.0);
        let e2 = Point::new(0.0, 1.0);
        assert!((e1.dot(&e2)).abs() < 1e-12);
        assert!((e1.cross(&e2) - 1.0).abs() < 1e-12);
        assert_eq!(e1 + e2, Point::new(1.0, 1.0));
        assert_eq!(e1 - e2, Point::new(1.0, -1.0));
    }

    #[test]
    fn test_estimated_position_accessors() {
        let est = EstimatedPosition::with_accuracy(2.0, 3.0, 0.5);
        assert_eq!(est.point(), Point::new(2.0, 3.0));
        assert_eq!(est.accuracy, Some(0.5));
        assert_eq!(EstimatedPosition::new(1.0, 1.0).accuracy, None);
    }
}
