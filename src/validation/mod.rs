//! Permissive input assessment

pub mod data;

pub use data::{validate_anchor_set, validate_ranged, ValidationError, ValidationResult};
