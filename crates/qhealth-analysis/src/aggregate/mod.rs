//! Per-agent workload aggregation.
//!
//! Folds the raw conversation list into one workload record per agent,
//! seeded from the roster so zero-workload agents still appear, with
//! unassigned and excluded conversations routed to their own counters.

pub mod fold;
pub mod types;

pub use fold::aggregate;
pub use types::{
    AgentRecord, AggregationResult, ExcludedCounts, FollowUpCandidate, UnassignedQueue,
};
