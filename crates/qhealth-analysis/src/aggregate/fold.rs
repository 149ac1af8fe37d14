//! The aggregation fold: conversations + roster → per-agent records.

use qhealth_core::models::{Conversation, TeamMember};
use qhealth_core::types::collections::{FxHashMap, FxHashSet};
use qhealth_core::types::{AgentId, UnixSeconds};
use qhealth_core::QueueConfig;

use crate::tags::{classify_tags, SnoozeCategory};

use super::types::{
    AgentRecord, AggregationResult, ExcludedCounts, FollowUpCandidate, UnassignedQueue,
};

/// Fold the conversation list into per-agent workload records.
///
/// `as_of` anchors every time-relative computation (unassigned ages,
/// follow-up candidate ages); it is the single clock read of the engine
/// and is passed in so two calls over the same inputs are bit-identical.
pub fn aggregate(
    conversations: &[Conversation],
    roster: &[TeamMember],
    config: &QueueConfig,
    as_of: UnixSeconds,
) -> AggregationResult {
    let excluded_names = config.exclusion_set();

    // Seed from the roster so agents with zero conversations still appear.
    let mut agents: FxHashMap<AgentId, AgentRecord> = roster
        .iter()
        .filter(|member| !is_excluded_member(member, &excluded_names))
        .map(|member| (member.id, AgentRecord::from_member(member)))
        .collect();

    let mut unassigned = UnassignedQueue::default();
    let mut excluded = ExcludedCounts::default();
    let mut total_open = 0u32;
    let mut total_snoozed = 0u32;
    let mut reassignment_candidates = Vec::new();
    let mut closure_candidates = Vec::new();

    for conv in conversations {
        let snoozed = conv.is_snoozed();
        let open = conv.is_open();
        if open {
            total_open += 1;
        }
        if snoozed {
            total_snoozed += 1;
        }

        // Conversations owned by excluded accounts are skipped entirely —
        // counted toward no agent, only toward the partition counters.
        if conv
            .assignee_name()
            .is_some_and(|name| excluded_names.contains(name))
        {
            excluded.total += 1;
            if open {
                excluded.open += 1;
            }
            continue;
        }

        // No resolvable agent id anywhere — including assignee objects
        // that carry only a name — routes to the unassigned queue rather
        // than guessing an agent.
        let Some(agent_id) = conv.assignee_id() else {
            unassigned.total += 1;
            if open {
                unassigned.open += 1;
            }
            if let Some(created_at) = conv.created_at {
                let hours = (as_of - created_at) as f64 / 3600.0;
                unassigned.wait_times_hours.push(hours);
            }
            continue;
        };

        let record = agents
            .entry(agent_id)
            .or_insert_with(|| AgentRecord::synthesized(agent_id, synthesize_name(conv, agent_id)));

        // The roster does not guarantee completeness: a synthesized record
        // may have started from a conversation without a usable name, so
        // upgrade placeholders when a later conversation has the real one.
        if record.has_placeholder_name() {
            if let Some(better) = best_assignee_name(conv) {
                record.name = better;
            }
        }

        if snoozed {
            record.total_snoozed += 1;
            match classify_tags(conv) {
                SnoozeCategory::WaitingOnAgent => {
                    record.waiting_on_agent += 1;
                    if let Some(hours) =
                        elapsed_hours(conv.snoozed_until.or(conv.updated_at), as_of)
                    {
                        if hours >= config.effective_reassignment_hours() as f64 {
                            reassignment_candidates.push(FollowUpCandidate {
                                conversation_id: conv.id.clone(),
                                agent_id,
                                hours: hours.round() as i64,
                            });
                        }
                    }
                }
                category @ (SnoozeCategory::WaitingOnCustomerResolved
                | SnoozeCategory::WaitingOnCustomerUnresolved) => {
                    if category == SnoozeCategory::WaitingOnCustomerResolved {
                        record.waiting_on_customer_resolved += 1;
                    } else {
                        record.waiting_on_customer_unresolved += 1;
                    }
                    if let Some(hours) =
                        elapsed_hours(conv.last_contacted_at.or(conv.updated_at), as_of)
                    {
                        let days = hours / 24.0;
                        if hours >= config.effective_closure_checkin_hours() as f64
                            || days >= config.effective_closure_warning_days() as f64
                        {
                            closure_candidates.push(FollowUpCandidate {
                                conversation_id: conv.id.clone(),
                                agent_id,
                                hours: hours.round() as i64,
                            });
                        }
                    }
                }
                // Snoozed with no workflow tag: only total_snoozed moves.
                // The gap between total_snoozed and the tagged counters is
                // the missing-tags signal consumed by the status classifier.
                SnoozeCategory::None => {}
            }
        }

        if open {
            record.open += 1;
        }
    }

    unassigned.median_wait_hours = median_rounded(&mut unassigned.wait_times_hours);

    AggregationResult {
        agents,
        unassigned,
        excluded,
        total_open,
        total_snoozed,
        reassignment_candidates,
        closure_candidates,
    }
}

fn is_excluded_member(member: &TeamMember, excluded: &FxHashSet<&str>) -> bool {
    member
        .name
        .as_deref()
        .is_some_and(|name| excluded.contains(name))
}

/// Hours elapsed from an optional timestamp to `as_of`. Missing or future
/// timestamps yield `None` — a conversation snoozed into the future has not
/// aged yet.
fn elapsed_hours(since: Option<UnixSeconds>, as_of: UnixSeconds) -> Option<f64> {
    let since = since?;
    (since <= as_of).then(|| (as_of - since) as f64 / 3600.0)
}

/// Fallback naming for agents missing from the roster:
/// assignee name → assignee email local-part → `"TSE {id}"`.
fn synthesize_name(conv: &Conversation, id: AgentId) -> String {
    best_assignee_name(conv).unwrap_or_else(|| format!("TSE {id}"))
}

fn best_assignee_name(conv: &Conversation) -> Option<String> {
    let assignee = conv.admin_assignee.as_ref()?;
    if let Some(name) = assignee.name().filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }
    assignee
        .email()
        .and_then(|e| e.split('@').next())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

/// Median of the samples (sorts in place), rounded to one decimal place.
/// Empty input yields 0.0.
fn median_rounded(samples: &mut [f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.sort_by(|a, b| a.total_cmp(b));
    let mid = samples.len() / 2;
    let median = if samples.len() % 2 == 0 {
        (samples[mid - 1] + samples[mid]) / 2.0
    } else {
        samples[mid]
    };
    (median * 10.0).round() / 10.0
}
