//! Engine configuration
//!
//! All deployment tunables in one serde-backed structure with JSON file
//! load/save, range validation, and runtime setters that return the
//! previous value on success.

use crate::core::{
    DEFAULT_MEASUREMENT_NOISE, DEFAULT_PATH_LOSS_EXPONENT, DEFAULT_PROCESS_NOISE,
    DEFAULT_REFINEMENT_ITERATIONS, DEFAULT_WALKING_SPEED_MS, DEFAULT_WINDOW_SIZE,
};
use crate::processing::filter_bank::SmoothingStrategy;
use crate::processing::kalman::KalmanConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Signal model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Path-loss exponent; 2.0 free space, 2–4 typical indoors
    pub path_loss_exponent: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            path_loss_exponent: DEFAULT_PATH_LOSS_EXPONENT,
        }
    }
}

/// Temporal smoothing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Smoothing strategy applied per anchor
    pub strategy: SmoothingStrategy,
    /// Moving-average window size (samples)
    pub window_size: usize,
    /// Kalman process noise covariance
    pub process_noise: f64,
    /// Kalman measurement noise covariance
    pub measurement_noise: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strategy: SmoothingStrategy::Kalman,
            window_size: DEFAULT_WINDOW_SIZE,
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
        }
    }
}

impl FilterConfig {
    /// The Kalman part of this configuration
    pub fn kalman(&self) -> KalmanConfig {
        KalmanConfig {
            process_noise: self.process_noise,
            measurement_noise: self.measurement_noise,
        }
    }
}

/// Position solver parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Fixed multilateration refinement rounds
    pub refinement_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            refinement_iterations: DEFAULT_REFINEMENT_ITERATIONS,
        }
    }
}

/// Route summary parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Walking speed used for time estimates (m/s)
    pub walking_speed_ms: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            walking_speed_ms: DEFAULT_WALKING_SPEED_MS,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub signal: SignalConfig,
    pub filter: FilterConfig,
    pub solver: SolverConfig,
    pub route: RouteConfig,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Parameter outside its valid range
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    /// Load and validate a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("failed to read config file '{}': {}", path_str, e),
        })?;

        let config: EngineConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("failed to parse config file '{}': {}", path_str, e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: format!("failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("failed to write config file '{}': {}", path_str, e),
        })
    }

    /// Check every parameter against its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1.0..=6.0).contains(&self.signal.path_loss_exponent) {
            return Err(ConfigError::InvalidParameter {
                parameter: "signal.path_loss_exponent".to_string(),
                value: self.signal.path_loss_exponent.to_string(),
                reason: "path-loss exponent must be between 1.0 and 6.0".to_string(),
            });
        }
        if self.filter.window_size == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "filter.window_size".to_string(),
                value: self.filter.window_size.to_string(),
                reason: "window size must be at least 1".to_string(),
            });
        }
        if self.filter.process_noise <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "filter.process_noise".to_string(),
                value: self.filter.process_noise.to_string(),
                reason: "process noise must be positive".to_string(),
            });
        }
        if self.filter.measurement_noise <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "filter.measurement_noise".to_string(),
                value: self.filter.measurement_noise.to_string(),
                reason: "measurement noise must be positive".to_string(),
            });
        }
        if !(1..=1000).contains(&self.solver.refinement_iterations) {
            return Err(ConfigError::InvalidParameter {
                parameter: "solver.refinement_iterations".to_string(),
                value: self.solver.refinement_iterations.to_string(),
                reason: "refinement iterations must be between 1 and 1000".to_string(),
            });
        }
        if self.route.walking_speed_ms <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "route.walking_speed_ms".to_string(),
                value: self.route.walking_speed_ms.to_string(),
                reason: "walking speed must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Update the path-loss exponent, returning the previous value
    pub fn set_path_loss_exponent(&mut self, exponent: f64) -> Result<f64, ConfigError> {
        if !(1.0..=6.0).contains(&exponent) {
            return Err(ConfigError::InvalidParameter {
                parameter: "signal.path_loss_exponent".to_string(),
                value: exponent.to_string(),
                reason: "path-loss exponent must be between 1.0 and 6.0".to_string(),
            });
        }
        let old = self.signal.path_loss_exponent;
        self.signal.path_loss_exponent = exponent;
        Ok(old)
    }

    /// Update the refinement iteration count, returning the previous value
    pub fn set_refinement_iterations(&mut self, iterations: usize) -> Result<usize, ConfigError> {
        if !(1..=1000).contains(&iterations) {
            return Err(ConfigError::InvalidParameter {
                parameter: "solver.refinement_iterations".to_string(),
                value: iterations.to_string(),
                reason: "refinement iterations must be between 1 and 1000".to_string(),
            });
        }
        let old = self.solver.refinement_iterations;
        self.solver.refinement_iterations = iterations;
        Ok(old)
    }

    /// Update the walking speed, returning the previous value
    pub fn set_walking_speed(&mut self, speed_ms: f64) -> Result<f64, ConfigError> {
        if speed_ms <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "route.walking_speed_ms".to_string(),
                value: speed_ms.to_string(),
                reason: "walking speed must be positive".to_string(),
            });
        }
        let old = self.route.walking_speed_ms;
        self.route.walking_speed_ms = speed_ms;
        Ok(old)
    }
}
