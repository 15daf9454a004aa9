//! RSSI to distance conversion
//!
//! Inverts the log-distance path-loss model: a reading at the calibrated
//! reference power corresponds to 1 m, and every 10·n dB of additional loss
//! corresponds to one decade of distance.

use crate::core::{DEFAULT_PATH_LOSS_EXPONENT, OUT_OF_RANGE_DISTANCE_M};

/// Estimate the distance to an anchor from a raw RSSI reading (meters).
///
/// `reference_power` is the calibrated RSSI at 1 m (dBm). A zero `rssi`
/// is the radio stack's out-of-range sentinel and maps to the fixed
/// fallback distance rather than an error.
pub fn estimate_distance(rssi: i32, reference_power: i32, path_loss_exponent: f64) -> f64 {
    if rssi == 0 {
        return OUT_OF_RANGE_DISTANCE_M;
    }

    let exponent = f64::from(reference_power - rssi) / (10.0 * path_loss_exponent);
    10f64.powf(exponent)
}

/// `estimate_distance` with the free-space path-loss exponent
pub fn estimate_distance_default(rssi: i32, reference_power: i32) -> f64 {
    estimate_distance(rssi, reference_power, DEFAULT_PATH_LOSS_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_power_reading_is_one_meter() {
        // Reading exactly the reference power means the receiver sits at
        // the 1 m calibration distance.
        let d = estimate_distance(-59, -59, 2.0);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_decade_per_20_db_free_space() {
        // With n = 2.0, 20 dB of extra loss is one decade of distance.
        let d = estimate_distance(-79, -59, 2.0);
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_higher_exponent_compresses_distance() {
        let free_space = estimate_distance(-79, -59, 2.0);
        let obstructed = estimate_distance(-79, -59, 4.0);
        assert!(obstructed < free_space);
        assert!((obstructed - 10f64.powf(0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rssi_returns_fallback_for_any_exponent() {
        for exponent in [2.0, 3.0, 4.0] {
            assert_eq!(estimate_distance(0, -59, exponent), 1.0);
            assert_eq!(estimate_distance(0, -80, exponent), 1.0);
        }
    }

    #[test]
    fn test_stronger_signal_means_shorter_distance() {
        let near = estimate_distance(-50, -59, 2.0);
        let far = estimate_distance(-70, -59, 2.0);
        assert!(near < 1.0);
        assert!(far > 1.0);
    }
}
