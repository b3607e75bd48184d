//! # Runtime Container
//!
//! Configuration for a cloner run.

pub mod config;

pub use config::{ClonerConfig, ConfigError, StorageBackend};
