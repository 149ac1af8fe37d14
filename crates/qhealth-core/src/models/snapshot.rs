//! Daily snapshot payload from the internal persistence API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::AgentId;

/// Per-agent counters as persisted in a daily snapshot.
///
/// The field names are the snapshot wire contract (camelCase); older rows
/// written before the counters were renamed are still readable through the
/// serde aliases.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: AgentId,
    pub name: String,
    pub open: u32,
    #[serde(alias = "actionableSnoozed")]
    pub waiting_on_agent: u32,
    pub waiting_on_customer_resolved: u32,
    pub waiting_on_customer_unresolved: u32,
    pub total_snoozed: u32,
}

/// One persisted snapshot: the per-agent counters captured on a calendar
/// day. At most one snapshot exists per date per deployment; dates sort
/// lexicographically equal to chronologically in the ISO form `NaiveDate`
/// serializes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    #[serde(default, alias = "tse_data", alias = "tseData")]
    pub agents: Vec<AgentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_current_and_legacy_field_names() {
        let current: DailySnapshot = serde_json::from_str(
            r#"{"date":"2026-08-21","agents":[
                {"id":1,"name":"Ana","open":2,"waitingOnAgent":1,"totalSnoozed":1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(current.agents[0].waiting_on_agent, 1);

        let legacy: DailySnapshot = serde_json::from_str(
            r#"{"date":"2025-11-03","tse_data":[
                {"id":1,"name":"Ana","open":0,"actionableSnoozed":3}
            ]}"#,
        )
        .unwrap();
        assert_eq!(legacy.agents[0].waiting_on_agent, 3);
    }

    #[test]
    fn iso_dates_sort_chronologically() {
        let a: NaiveDate = "2026-01-31".parse().unwrap();
        let b: NaiveDate = "2026-02-01".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
