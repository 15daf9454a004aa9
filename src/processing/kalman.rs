//! Scalar Kalman filter for per-anchor temporal smoothing
//!
//! A degenerate (1D, no control input) Kalman filter. The only tuning
//! knobs are the two noise covariances; callers needing faster convergence
//! raise the process noise.

use crate::core::{DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE};
use serde::{Deserialize, Serialize};

/// Noise parameters for the scalar filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanConfig {
    /// Process noise covariance (q)
    pub process_noise: f64,
    /// Measurement noise covariance (r)
    pub measurement_noise: f64,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
        }
    }
}

/// Filter state: the running estimate and its error covariance.
///
/// Owned by the caller, one per anchor per scanning session. The default
/// state is used for the first sample from an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanState {
    pub estimate: f64,
    pub error_variance: f64,
}

impl Default for KalmanState {
    fn default() -> Self {
        Self {
            estimate: 0.0,
            error_variance: 1.0,
        }
    }
}

/// One predict-update cycle as a pure transform: `(state, measurement)`
/// in, `(new state, smoothed value)` out. Never fails; any real-valued
/// measurement is acceptable.
pub fn kalman_step(state: KalmanState, config: &KalmanConfig, measurement: f64) -> (KalmanState, f64) {
    let predicted_error = state.error_variance + config.process_noise;
    let gain = predicted_error / (predicted_error + config.measurement_noise);

    let estimate = state.estimate + gain * (measurement - state.estimate);
    let error_variance = (1.0 - gain) * predicted_error;

    let next = KalmanState {
        estimate,
        error_variance,
    };
    (next, estimate)
}

/// Convenience wrapper owning one state alongside its configuration
#[derive(Debug, Clone, Default)]
pub struct ScalarKalmanFilter {
    config: KalmanConfig,
    state: KalmanState,
}

impl ScalarKalmanFilter {
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            config,
            state: KalmanState::default(),
        }
    }

    /// Create with explicit noise parameters
    pub fn with_noise_parameters(process_noise: f64, measurement_noise: f64) -> Self {
        Self::new(KalmanConfig {
            process_noise,
            measurement_noise,
        })
    }

    /// Feed one measurement and return the smoothed value
    pub fn update(&mut self, measurement: f64) -> f64 {
        let (next, smoothed) = kalman_step(self.state, &self.config, measurement);
        self.state = next;
        smoothed
    }

    /// Current filter state
    pub fn state(&self) -> KalmanState {
        self.state
    }

    /// Reset to the initial state, keeping the noise parameters
    pub fn reset(&mut self) {
        self.state = KalmanState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_moves_toward_measurement() {
        let mut filter = ScalarKalmanFilter::default();
        let smoothed = filter.update(10.0);
        assert!(smoothed > 0.0 && smoothed < 10.0);
    }

    #[test]
    fn test_repeated_measurements_stabilize() {
        let mut filter = ScalarKalmanFilter::default();
        let mut last = 0.0;
        for _ in 0..50 {
            last = filter.update(5.0);
        }
        assert!((last - 5.0).abs() < 0.05);
    }

    #[test]
    fn test_error_variance_monotonically_non_increasing() {
        let mut filter = ScalarKalmanFilter::default();
        let mut previous = filter.state().error_variance;
        for _ in 0..20 {
            filter.update(3.0);
            let current = filter.state().error_variance;
            assert!(current <= previous + 1e-12);
            previous = current;
        }
    }

    #[test]
    fn test_pure_step_leaves_input_state_unchanged() {
        let config = KalmanConfig::default();
        let initial = KalmanState::default();
        let (next, smoothed) = kalman_step(initial, &config, 4.0);
        assert_eq!(initial, KalmanState::default());
        assert_eq!(next.estimate, smoothed);
        assert!(next.error_variance < initial.error_variance);
    }

    #[test]
    fn test_higher_process_noise_converges_faster() {
        let mut slow = ScalarKalmanFilter::with_noise_parameters(0.01, 0.5);
        let mut fast = ScalarKalmanFilter::with_noise_parameters(1.0, 0.5);
        let mut slow_value = 0.0;
        let mut fast_value = 0.0;
        for _ in 0..5 {
            slow_value = slow.update(8.0);
            fast_value = fast.update(8.0);
        }
        assert!((8.0 - fast_value).abs() < (8.0 - slow_value).abs());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut filter = ScalarKalmanFilter::default();
        filter.update(9.0);
        filter.reset();
        assert_eq!(filter.state(), KalmanState::default());
    }
}
