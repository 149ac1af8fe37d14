//! Shared type aliases.

pub mod collections;

/// Stable agent identifier as issued by the upstream helpdesk API.
pub type AgentId = i64;

/// Unix timestamp in seconds, the upstream wire format for all instants.
pub type UnixSeconds = i64;
