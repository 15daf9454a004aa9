//! Bounded-window moving-average filter

use crate::core::DEFAULT_WINDOW_SIZE;
use std::collections::VecDeque;

/// Moving-average filter over the last `window_size` raw values.
///
/// State is explicit and caller-owned: one filter per anchor per scanning
/// session. The window is a bounded FIFO; the oldest sample is evicted on
/// overflow.
#[derive(Debug, Clone)]
pub struct MovingAverageFilter {
    window: VecDeque<f64>,
    window_size: usize,
}

impl Default for MovingAverageFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl MovingAverageFilter {
    /// Create a filter with the given window size.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero; that is a programmer error, not a
    /// data condition.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "moving-average window size must be positive");
        Self {
            window: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// Push a new raw value and return the smoothed value
    pub fn update(&mut self, value: f64) -> f64 {
        if self.window.len() == self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(value);
        self.average()
    }

    /// Arithmetic mean of the current window; `0.0` when empty
    pub fn average(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Drop all held samples
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_sequence_returns_constant() {
        let mut filter = MovingAverageFilter::new(5);
        for _ in 0..10 {
            assert!((filter.update(7.5) - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut filter = MovingAverageFilter::new(3);
        let mut last = 0.0;
        for v in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
            last = filter.update(v);
        }
        // Mean of the last three values [4, 5, 6]
        assert!((last - 5.0).abs() < 1e-12);
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_empty_window_averages_to_zero() {
        let filter = MovingAverageFilter::new(4);
        assert_eq!(filter.average(), 0.0);
    }

    #[test]
    fn test_partial_window() {
        let mut filter = MovingAverageFilter::new(5);
        filter.update(2.0);
        let smoothed = filter.update(4.0);
        assert!((smoothed - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = MovingAverageFilter::new(3);
        filter.update(10.0);
        filter.reset();
        assert!(filter.is_empty());
        assert_eq!(filter.average(), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_zero_window_panics() {
        let _ = MovingAverageFilter::new(0);
    }
}
