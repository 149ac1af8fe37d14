//! Threshold alerts over classified agent records.
//!
//! Alert thresholds sit deliberately above the status classifier's soft
//! limits: an agent goes off-track before anyone is paged for it.

use serde::Serialize;

use qhealth_core::types::AgentId;
use qhealth_core::QueueConfig;

use crate::aggregate::AgentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    OpenThreshold,
    WaitingThreshold,
}

impl AlertKind {
    fn as_str(self) -> &'static str {
        match self {
            AlertKind::OpenThreshold => "open_threshold",
            AlertKind::WaitingThreshold => "waiting_threshold",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            AlertKind::OpenThreshold => "open conversations",
            AlertKind::WaitingThreshold => "waiting on agent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

/// A single fired alert. The id is deterministic over (agent, kind,
/// count), so re-running the engine over the same inputs produces the
/// same ids with no dedup state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub kind: AlertKind,
    pub severity: Severity,
    /// The counter that crossed the threshold.
    pub count: u32,
    pub threshold: u32,
    /// Human-readable summary for the rendering layer.
    pub message: String,
}

/// Evaluate one agent record against the alert thresholds. Yields zero,
/// one, or two alerts. The caller is responsible for not feeding excluded
/// or unassigned records in.
pub fn evaluate_agent(record: &AgentRecord, config: &QueueConfig) -> Vec<Alert> {
    let margin = config.effective_high_severity_margin();
    let mut alerts = Vec::new();

    let checks = [
        (
            AlertKind::OpenThreshold,
            record.open,
            config.effective_max_open_alert(),
        ),
        (
            AlertKind::WaitingThreshold,
            record.waiting_on_agent,
            config.effective_max_waiting_alert(),
        ),
    ];

    for (kind, count, threshold) in checks {
        if count < threshold {
            continue;
        }
        let severity = if count >= threshold + margin {
            Severity::High
        } else {
            Severity::Medium
        };
        alerts.push(Alert {
            id: format!("{}:{}:{}", record.id, kind.as_str(), count),
            agent_id: record.id,
            agent_name: record.name.clone(),
            kind,
            severity,
            count,
            threshold,
            message: format!(
                "{}: {} {} (threshold: {}+)",
                record.name,
                count,
                kind.noun(),
                threshold
            ),
        });
    }

    alerts
}

/// Evaluate a whole cohort, sorted by agent id for deterministic output.
pub fn evaluate_all<'a, I>(records: I, config: &QueueConfig) -> Vec<Alert>
where
    I: IntoIterator<Item = &'a AgentRecord>,
{
    let mut alerts: Vec<Alert> = records
        .into_iter()
        .flat_map(|record| evaluate_agent(record, config))
        .collect();
    alerts.sort_by(|a, b| a.agent_id.cmp(&b.agent_id).then(a.id.cmp(&b.id)));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(open: u32, waiting: u32) -> AgentRecord {
        AgentRecord {
            open,
            waiting_on_agent: waiting,
            ..AgentRecord::synthesized(1, "Ana".to_string())
        }
    }

    #[test]
    fn below_thresholds_fires_nothing() {
        let config = QueueConfig::default();
        assert!(evaluate_agent(&record(5, 6), &config).is_empty());
    }

    #[test]
    fn at_threshold_fires_medium() {
        let config = QueueConfig::default();
        let alerts = evaluate_agent(&record(6, 0), &config);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::OpenThreshold);
        assert_eq!(alerts[0].severity, Severity::Medium);
        assert_eq!(alerts[0].id, "1:open_threshold:6");
        assert_eq!(alerts[0].message, "Ana: 6 open conversations (threshold: 6+)");
    }

    #[test]
    fn waiting_alert_message_names_the_counter() {
        let config = QueueConfig::default();
        let alerts = evaluate_agent(&record(0, 8), &config);
        assert_eq!(alerts[0].message, "Ana: 8 waiting on agent (threshold: 7+)");
    }

    #[test]
    fn threshold_plus_margin_fires_high() {
        let config = QueueConfig::default();
        let alerts = evaluate_agent(&record(9, 0), &config);
        assert_eq!(alerts[0].severity, Severity::High);
        // One below the margin stays medium.
        let alerts = evaluate_agent(&record(8, 0), &config);
        assert_eq!(alerts[0].severity, Severity::Medium);
    }

    #[test]
    fn both_counters_over_fires_two() {
        let config = QueueConfig::default();
        let alerts = evaluate_agent(&record(6, 7), &config);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::OpenThreshold);
        assert_eq!(alerts[1].kind, AlertKind::WaitingThreshold);
    }

    #[test]
    fn waiting_threshold_is_a_higher_bar() {
        let config = QueueConfig::default();
        // 6 waiting crosses neither (waiting alert is 7, not 6).
        assert!(evaluate_agent(&record(0, 6), &config).is_empty());
        let alerts = evaluate_agent(&record(0, 10), &config);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn cohort_output_is_sorted_by_agent() {
        let config = QueueConfig::default();
        let mut a = record(7, 0);
        a.id = 2;
        let mut b = record(6, 0);
        b.id = 1;
        let alerts = evaluate_all([&a, &b], &config);
        assert_eq!(alerts[0].agent_id, 1);
        assert_eq!(alerts[1].agent_id, 2);
    }
}
