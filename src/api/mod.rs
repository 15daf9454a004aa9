//! Collaborator-facing API
//!
//! The engine itself is a computation library; acquisition and transport
//! layers call through this facade with wire-shaped inputs and render the
//! formatted outputs themselves.

pub mod blocking;
pub mod formatting;
pub mod types;

pub use blocking::PositioningEngine;
pub use formatting::{formatter, CsvFormatter, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
pub use types::{ApiError, ApiResult, BeaconReading, LocationFix, RouteSummary};
