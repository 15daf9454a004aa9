//! Position solving algorithms

pub mod multilateration;
pub mod quality;
pub mod trilateration;

pub use multilateration::PositionSolver;
pub use quality::{rms_residual, FixQuality};
pub use trilateration::{trilaterate_geometric, trilaterate_linear};
