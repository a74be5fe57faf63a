//! Application glue module
//!
//! Configuration for the headless runner.

mod config;

pub use config::{Config, ConfigError, MarkerConfig, OutputFormat};
