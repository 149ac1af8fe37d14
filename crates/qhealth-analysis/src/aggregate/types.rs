//! Output types of the aggregation fold.

use serde::Serialize;

use qhealth_core::models::TeamMember;
use qhealth_core::types::collections::FxHashMap;
use qhealth_core::types::AgentId;

/// One agent's workload, rebuilt fresh on every aggregation pass.
///
/// Never persisted directly — the persisted form is the snapshot's
/// `AgentSummary`, written by an external collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub name: String,
    pub away: bool,
    pub open: u32,
    pub waiting_on_agent: u32,
    pub waiting_on_customer_resolved: u32,
    pub waiting_on_customer_unresolved: u32,
    pub total_snoozed: u32,
}

impl AgentRecord {
    /// Zeroed record for a roster member.
    pub fn from_member(member: &TeamMember) -> Self {
        Self {
            id: member.id,
            name: member.display_name(),
            away: member.away_mode_enabled,
            open: 0,
            waiting_on_agent: 0,
            waiting_on_customer_resolved: 0,
            waiting_on_customer_unresolved: 0,
            total_snoozed: 0,
        }
    }

    /// Zeroed record synthesized for an assignee the roster did not list.
    pub fn synthesized(id: AgentId, name: String) -> Self {
        Self {
            id,
            name,
            away: false,
            open: 0,
            waiting_on_agent: 0,
            waiting_on_customer_resolved: 0,
            waiting_on_customer_unresolved: 0,
            total_snoozed: 0,
        }
    }

    /// Sum of the workflow-tagged snooze counters. When `total_snoozed`
    /// exceeds this, untagged snoozed conversations exist — the signal the
    /// status classifier turns into a missing-tags warning.
    pub fn tagged_snoozed(&self) -> u32 {
        self.waiting_on_agent + self.waiting_on_customer_resolved + self.waiting_on_customer_unresolved
    }

    /// Whether the current name is a synthesized placeholder that a later
    /// conversation may upgrade.
    pub fn has_placeholder_name(&self) -> bool {
        self.name.starts_with("TSE ")
    }
}

/// Unassigned conversations, tracked separately from any agent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnassignedQueue {
    /// All unassigned conversations, any lifecycle state.
    pub total: u32,
    /// Unassigned conversations currently in the open state.
    pub open: u32,
    /// Age of each unassigned conversation in hours, relative to `as_of`.
    /// Conversations without a creation timestamp contribute no sample.
    pub wait_times_hours: Vec<f64>,
    /// Median of `wait_times_hours`, rounded to one decimal place.
    pub median_wait_hours: f64,
}

/// Conversations skipped because their assignee is on the exclusion list.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ExcludedCounts {
    pub total: u32,
    pub open: u32,
}

/// A conversation flagged for follow-up action.
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpCandidate {
    pub conversation_id: Option<String>,
    pub agent_id: AgentId,
    /// Whole hours elapsed, rounded to nearest.
    pub hours: i64,
}

/// The complete output of one aggregation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationResult {
    pub agents: FxHashMap<AgentId, AgentRecord>,
    pub unassigned: UnassignedQueue,
    pub excluded: ExcludedCounts,
    /// Open (non-snoozed) conversations across the entire input list.
    pub total_open: u32,
    /// Snoozed conversations across the entire input list.
    pub total_snoozed: u32,
    /// Waiting-on-agent snoozes older than the reassignment threshold.
    pub reassignment_candidates: Vec<FollowUpCandidate>,
    /// Customer-wait snoozes quiet past the closure thresholds.
    pub closure_candidates: Vec<FollowUpCandidate>,
}
