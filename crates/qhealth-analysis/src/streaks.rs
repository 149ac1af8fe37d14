//! Outstanding-day streak detection over snapshot history.

use chrono::NaiveDate;
use serde::Serialize;

use qhealth_core::models::DailySnapshot;
use qhealth_core::types::AgentId;

/// Streaks below this length are noise, not an achievement.
const MIN_REPORTABLE_STREAK: u32 = 3;

/// One agent's counters on one snapshot day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub open: u32,
    pub waiting_on_agent: u32,
}

impl HistoryDay {
    /// The Outstanding predicate: nothing open, nothing waiting.
    pub fn is_outstanding(&self) -> bool {
        self.open == 0 && self.waiting_on_agent == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakResult {
    pub agent_id: AgentId,
    pub agent_name: String,
    /// Consecutive Outstanding days ending at the most recent snapshot;
    /// zero when the run is shorter than three days.
    pub streak: u32,
    /// Lifetime count of Outstanding days, contiguous or not.
    pub lifetime_outstanding: u32,
}

/// Extract one agent's history from a snapshot list.
///
/// The join is keyed on agent id first, falling back to the display name
/// for snapshots written before ids were persisted. Snapshots with no row
/// for the agent contribute no day. The result is sorted descending by
/// date, ready for `detect_streak`.
pub fn agent_history(snapshots: &[DailySnapshot], id: AgentId, name: &str) -> Vec<HistoryDay> {
    let mut days: Vec<HistoryDay> = snapshots
        .iter()
        .filter_map(|snapshot| {
            let summary = snapshot
                .agents
                .iter()
                .find(|a| a.id == id)
                .or_else(|| snapshot.agents.iter().find(|a| a.name == name))?;
            Some(HistoryDay {
                date: snapshot.date,
                open: summary.open,
                waiting_on_agent: summary.waiting_on_agent,
            })
        })
        .collect();
    days.sort_by_key(|d| std::cmp::Reverse(d.date));
    days
}

/// Walk the history from the most recent day backward, counting while the
/// Outstanding predicate holds. A day missing from the snapshot record is
/// simply absent from the history, so it ends the walk the same way a
/// non-Outstanding day does; date continuity is not verified separately.
pub fn detect_streak(id: AgentId, name: &str, history: &[HistoryDay]) -> StreakResult {
    let mut days = history.to_vec();
    days.sort_by_key(|d| std::cmp::Reverse(d.date));

    let run = days.iter().take_while(|d| d.is_outstanding()).count() as u32;
    let lifetime = days.iter().filter(|d| d.is_outstanding()).count() as u32;

    StreakResult {
        agent_id: id,
        agent_name: name.to_string(),
        streak: if run >= MIN_REPORTABLE_STREAK { run } else { 0 },
        lifetime_outstanding: lifetime,
    }
}

/// Order streak results for display: longest current streak first,
/// lifetime Outstanding days breaking ties, agent id as a stable final
/// key.
pub fn rank_streaks(results: &mut [StreakResult]) {
    results.sort_by(|a, b| {
        b.streak
            .cmp(&a.streak)
            .then(b.lifetime_outstanding.cmp(&a.lifetime_outstanding))
            .then(a.agent_id.cmp(&b.agent_id))
    });
}
