//! Configuration and support utilities

pub mod config;

pub use config::{ConfigError, EngineConfig, FilterConfig, RouteConfig, SignalConfig, SolverConfig};
