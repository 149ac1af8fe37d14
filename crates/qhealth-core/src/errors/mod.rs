//! Error handling for the queue health engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! The analysis core itself never errors on data-shape irregularities —
//! malformed conversations degrade to conservative classifications and
//! short histories yield `None`. The only fail-fast surface is
//! configuration validation.

pub mod config_error;

pub use config_error::ConfigError;
