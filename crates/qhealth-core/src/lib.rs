//! qhealth-core — models, configuration, errors, and shared types for the
//! queue health aggregation engine.
//!
//! This crate owns the wire-shape contract with external collaborators:
//! the conversation and roster payloads fetched from the helpdesk API, and
//! the daily snapshot / response-time payloads fetched from the internal
//! persistence API. It carries no computation beyond field access helpers;
//! the analysis lives in `qhealth-analysis`.

pub mod config;
pub mod errors;
pub mod models;
pub mod types;

pub use config::QueueConfig;
pub use errors::ConfigError;
