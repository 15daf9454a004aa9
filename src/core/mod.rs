//! Core data types and constants

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::{Anchor, EstimatedPosition, Point, RangedAnchor, Sample};
