//! # Node Container
//!
//! Configuration and wiring for the registry service and its event bus.

pub mod config;

pub use config::{ConfigError, NodeConfig};
