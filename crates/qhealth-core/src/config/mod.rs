//! Configuration for the queue health engine.

pub mod queue_config;

pub use queue_config::QueueConfig;
