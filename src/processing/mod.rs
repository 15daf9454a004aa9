//! Signal-domain processing: RSSI conversion and temporal smoothing

pub mod filter_bank;
pub mod kalman;
pub mod moving_average;
pub mod signal_model;

pub use filter_bank::{FilterBank, SmoothingStrategy};
pub use kalman::{KalmanConfig, KalmanState, ScalarKalmanFilter};
pub use moving_average::MovingAverageFilter;
pub use signal_model::{estimate_distance, estimate_distance_default};
