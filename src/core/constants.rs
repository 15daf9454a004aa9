//! Physical constants and system parameters

/// Free-space path-loss exponent, used when no deployment calibration is
/// available. Indoor environments with obstruction typically fall between
/// 2.0 and 4.0.
pub const DEFAULT_PATH_LOSS_EXPONENT: f64 = 2.0;

/// Distance reported for a zero-RSSI reading (meters).
/// A zero reading is the radio stack's out-of-range sentinel, not an error.
pub const OUT_OF_RANGE_DISTANCE_M: f64 = 1.0;

/// Default moving-average window size (samples per anchor)
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default Kalman process noise covariance
pub const DEFAULT_PROCESS_NOISE: f64 = 0.1;

/// Default Kalman measurement noise covariance
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 0.5;

/// Fixed iteration count for multilateration refinement.
/// Bounds worst-case latency instead of checking convergence.
pub const DEFAULT_REFINEMENT_ITERATIONS: usize = 10;

/// Perpendicular-offset threshold below which three anchors are treated
/// as collinear by the geometric trilateration formulation
pub const COLLINEARITY_EPSILON: f64 = 1e-6;

/// Determinant threshold below which the linear trilateration system is
/// treated as singular
pub const SINGULARITY_EPSILON: f64 = 1e-10;

/// Default walking speed for route time estimates (m/s)
pub const DEFAULT_WALKING_SPEED_MS: f64 = 1.4;
