//! Common API types and data structures

use crate::algorithms::quality::FixQuality;
use crate::core::{Point, Sample};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Too few readings matched registered anchors
    InsufficientAnchors { available: usize, required: usize },
    /// Anchor geometry does not admit a solution
    DegenerateGeometry,
    /// Invalid request parameters
    InvalidRequest { reason: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InsufficientAnchors {
                available,
                required,
            } => write!(
                f,
                "insufficient anchors: {} usable, {} required",
                available, required
            ),
            ApiError::DegenerateGeometry => {
                write!(f, "anchor geometry does not admit a position solution")
            }
            ApiError::InvalidRequest { reason } => write!(f, "invalid request: {}", reason),
        }
    }
}

impl std::error::Error for ApiError {}

/// One beacon observation as supplied by the acquisition layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconReading {
    /// Beacon identifier (UUID or deployment label)
    pub id: String,
    /// Received signal strength (dBm); 0 is the out-of-range sentinel
    pub rssi: i32,
    /// Per-reading transmit power override (dBm); the registered anchor's
    /// reference power applies when absent
    pub tx_power: Option<i32>,
}

impl BeaconReading {
    pub fn new(id: impl Into<String>, rssi: i32) -> Self {
        Self {
            id: id.into(),
            rssi,
            tx_power: None,
        }
    }

    pub fn with_tx_power(id: impl Into<String>, rssi: i32, tx_power: i32) -> Self {
        Self {
            id: id.into(),
            rssi,
            tx_power: Some(tx_power),
        }
    }
}

impl From<&Sample> for BeaconReading {
    fn from(sample: &Sample) -> Self {
        Self {
            id: sample.anchor_id.clone(),
            rssi: sample.rssi,
            tx_power: None,
        }
    }
}

/// A solved position with its quality metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Estimated position in floor-plan coordinates
    pub position: Point,
    /// RMS range residual at the solution (meters), when computable
    pub accuracy: Option<f64>,
    /// Coarse fix grade derived from the residual
    pub quality: FixQuality,
    /// Number of anchors that contributed to the solution
    pub anchors_used: usize,
}

/// A computed route with its summary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Ordered route positions, start to goal inclusive; empty when the
    /// goal is unreachable
    pub points: Vec<Point>,
    /// Total route length (meters)
    pub distance: f64,
    /// Walking-time estimate at the configured speed (seconds)
    pub estimated_time_s: f64,
}

impl RouteSummary {
    /// Whether a traversable route was found
    pub fn is_reachable(&self) -> bool {
        !self.points.is_empty()
    }
}
