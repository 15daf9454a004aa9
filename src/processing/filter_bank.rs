//! Per-anchor filter state owned by a single scanning session

use crate::core::DEFAULT_WINDOW_SIZE;
use crate::processing::kalman::{KalmanConfig, ScalarKalmanFilter};
use crate::processing::moving_average::MovingAverageFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which smoothing strategy a session applies to its samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingStrategy {
    /// Bounded-window arithmetic mean
    MovingAverage,
    /// Scalar Kalman filter
    Kalman,
}

#[derive(Debug, Clone)]
enum AnchorFilter {
    MovingAverage(MovingAverageFilter),
    Kalman(ScalarKalmanFilter),
}

impl AnchorFilter {
    fn update(&mut self, value: f64) -> f64 {
        match self {
            AnchorFilter::MovingAverage(filter) => filter.update(value),
            AnchorFilter::Kalman(filter) => filter.update(value),
        }
    }
}

/// Map from anchor id to that anchor's filter state.
///
/// One bank per scanning session; concurrent sessions each own their own
/// bank and never share filter state.
#[derive(Debug, Clone)]
pub struct FilterBank {
    strategy: SmoothingStrategy,
    window_size: usize,
    kalman: KalmanConfig,
    filters: HashMap<String, AnchorFilter>,
}

impl Default for FilterBank {
    fn default() -> Self {
        Self::new(SmoothingStrategy::Kalman, DEFAULT_WINDOW_SIZE, KalmanConfig::default())
    }
}

impl FilterBank {
    pub fn new(strategy: SmoothingStrategy, window_size: usize, kalman: KalmanConfig) -> Self {
        Self {
            strategy,
            window_size,
            kalman,
            filters: HashMap::new(),
        }
    }

    /// Feed one value for an anchor through its filter, creating the
    /// filter state on the anchor's first sample
    pub fn update(&mut self, anchor_id: &str, value: f64) -> f64 {
        if !self.filters.contains_key(anchor_id) {
            let filter = match self.strategy {
                SmoothingStrategy::MovingAverage => {
                    AnchorFilter::MovingAverage(MovingAverageFilter::new(self.window_size))
                }
                SmoothingStrategy::Kalman => {
                    AnchorFilter::Kalman(ScalarKalmanFilter::new(self.kalman))
                }
            };
            self.filters.insert(anchor_id.to_string(), filter);
        }
        // Present after the insert above
        match self.filters.get_mut(anchor_id) {
            Some(filter) => filter.update(value),
            None => value,
        }
    }

    /// Number of anchors with live filter state
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Drop all per-anchor state, e.g. when a session restarts
    pub fn reset(&mut self) {
        self.filters.clear();
    }

    pub fn strategy(&self) -> SmoothingStrategy {
        self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_state_per_anchor() {
        let mut bank = FilterBank::new(SmoothingStrategy::MovingAverage, 3, KalmanConfig::default());
        bank.update("a", 10.0);
        bank.update("a", 20.0);
        let a = bank.update("a", 30.0);
        let b = bank.update("b", 2.0);
        assert!((a - 20.0).abs() < 1e-12);
        assert!((b - 2.0).abs() < 1e-12);
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_kalman_bank_smooths_per_anchor() {
        let mut bank = FilterBank::default();
        let first = bank.update("a", 10.0);
        let second = bank.update("a", 10.0);
        // Converging toward the repeated measurement
        assert!(second > first);
        assert!(second < 10.0);
    }

    #[test]
    fn test_reset_drops_state() {
        let mut bank = FilterBank::default();
        bank.update("a", 5.0);
        bank.reset();
        assert!(bank.is_empty());
    }
}
