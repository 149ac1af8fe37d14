//! Per-agent status classification and cohort roll-up.

use serde::Serialize;

use qhealth_core::QueueConfig;

use crate::aggregate::AgentRecord;

/// Health status of a single agent's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing open, nothing waiting on the agent.
    Outstanding,
    /// Within both soft limits and every snoozed conversation carries a
    /// workflow tag.
    OnTrack,
    /// Within both soft limits but snoozed conversations exist without a
    /// workflow tag.
    MissingTags,
    /// Over either soft limit.
    OverLimit,
}

/// Classify one agent record. Rules are evaluated in order; the first
/// match wins, so an agent that is simultaneously over-limit and missing
/// tags reports as over-limit.
pub fn classify(record: &AgentRecord, config: &QueueConfig) -> Status {
    let open_soft = config.effective_max_open_soft();
    let waiting_soft = config.effective_max_waiting_soft();

    if record.open == 0 && record.waiting_on_agent == 0 {
        return Status::Outstanding;
    }
    if record.open > open_soft || record.waiting_on_agent > waiting_soft {
        return Status::OverLimit;
    }
    if record.open <= open_soft && record.waiting_on_agent <= waiting_soft {
        if record.total_snoozed > record.tagged_snoozed() {
            return Status::MissingTags;
        }
        return Status::OnTrack;
    }
    // Unreachable given the rules above are exhaustive, but classify
    // conservatively rather than panic.
    Status::OverLimit
}

/// Cohort-level percentages over a set of classified agents.
///
/// The three percentages are independent counts over the same cohort,
/// not a partition: an agent within the open limit but over the waiting
/// limit counts toward `open_only_pct` and against `waiting_only_pct`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct CohortSummary {
    pub cohort_size: u32,
    /// Percent of agents meeting both soft limits, rounded to nearest.
    pub on_track_pct: u32,
    /// Percent of agents within the open soft limit.
    pub open_only_pct: u32,
    /// Percent of agents within the waiting-on-agent soft limit.
    pub waiting_only_pct: u32,
}

impl CohortSummary {
    pub fn compute<'a, I>(records: I, config: &QueueConfig) -> Self
    where
        I: IntoIterator<Item = &'a AgentRecord>,
    {
        let open_soft = config.effective_max_open_soft();
        let waiting_soft = config.effective_max_waiting_soft();

        let mut size = 0u32;
        let mut both = 0u32;
        let mut open_ok = 0u32;
        let mut waiting_ok = 0u32;
        for record in records {
            size += 1;
            let o = record.open <= open_soft;
            let w = record.waiting_on_agent <= waiting_soft;
            if o && w {
                both += 1;
            }
            if o {
                open_ok += 1;
            }
            if w {
                waiting_ok += 1;
            }
        }

        CohortSummary {
            cohort_size: size,
            on_track_pct: pct(both, size),
            open_only_pct: pct(open_ok, size),
            waiting_only_pct: pct(waiting_ok, size),
        }
    }
}

fn pct(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(open: u32, waiting: u32, total_snoozed: u32, tagged: u32) -> AgentRecord {
        AgentRecord {
            open,
            waiting_on_agent: waiting,
            waiting_on_customer_resolved: tagged.saturating_sub(waiting),
            total_snoozed,
            ..AgentRecord::synthesized(1, "Ana".to_string())
        }
    }

    #[test]
    fn empty_queue_is_outstanding() {
        let config = QueueConfig::default();
        assert_eq!(classify(&record(0, 0, 0, 0), &config), Status::Outstanding);
        // Customer-wait snoozes alone do not break Outstanding.
        assert_eq!(classify(&record(0, 0, 2, 2), &config), Status::Outstanding);
    }

    #[test]
    fn over_limit_wins_over_missing_tags() {
        let config = QueueConfig::default();
        // open=7 (> 5) and an untagged snooze: over-limit takes precedence.
        assert_eq!(classify(&record(7, 1, 3, 1), &config), Status::OverLimit);
        assert_eq!(classify(&record(1, 6, 6, 6), &config), Status::OverLimit);
    }

    #[test]
    fn untagged_snoozes_within_limits_warn() {
        let config = QueueConfig::default();
        assert_eq!(classify(&record(2, 1, 3, 1), &config), Status::MissingTags);
    }

    #[test]
    fn within_limits_and_fully_tagged_is_on_track() {
        let config = QueueConfig::default();
        assert_eq!(classify(&record(1, 1, 1, 1), &config), Status::OnTrack);
        // Exactly at the soft limits still passes.
        assert_eq!(classify(&record(5, 5, 5, 5), &config), Status::OnTrack);
    }

    #[test]
    fn cohort_percentages_are_independent() {
        let config = QueueConfig::default();
        let records = vec![
            record(2, 1, 1, 1),  // both ok
            record(8, 1, 1, 1),  // open over
            record(1, 9, 9, 9),  // waiting over
            record(9, 9, 9, 9),  // both over
        ];
        let summary = CohortSummary::compute(&records, &config);
        assert_eq!(summary.cohort_size, 4);
        assert_eq!(summary.on_track_pct, 25);
        assert_eq!(summary.open_only_pct, 50);
        assert_eq!(summary.waiting_only_pct, 50);
    }

    #[test]
    fn empty_cohort_is_all_zeros() {
        let empty: Vec<AgentRecord> = Vec::new();
        let summary = CohortSummary::compute(&empty, &QueueConfig::default());
        assert_eq!(summary, CohortSummary::default());
    }
}
