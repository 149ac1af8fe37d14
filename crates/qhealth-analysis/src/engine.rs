//! QueueHealthEngine: orchestrates the aggregate → classify → alert pass.

use serde::Serialize;
use tracing::{debug, info};

use qhealth_core::models::{Conversation, TeamMember};
use qhealth_core::types::collections::FxHashMap;
use qhealth_core::types::{AgentId, UnixSeconds};
use qhealth_core::{ConfigError, QueueConfig};

use crate::aggregate::{self, AggregationResult};
use crate::alerts::{self, Alert};
use crate::status::{self, CohortSummary, Status};

/// One full evaluation of the queue: the aggregated records, the status
/// each agent classified to, the cohort roll-up, and fired alerts.
#[derive(Debug, Clone, Serialize)]
pub struct QueueHealthReport {
    pub aggregation: AggregationResult,
    pub statuses: FxHashMap<AgentId, Status>,
    pub cohort: CohortSummary,
    pub alerts: Vec<Alert>,
}

/// The evaluation pipeline over live conversation and roster payloads.
///
/// Trend, streak, and correlation analysis consume persisted history
/// rather than live payloads and stay free functions in their modules.
pub struct QueueHealthEngine {
    config: QueueConfig,
}

impl QueueHealthEngine {
    /// Build an engine, validating the thresholds up front. A config with
    /// an alert threshold at or below its soft limit is a programming
    /// error and fails here rather than mis-classifying silently.
    pub fn new(config: QueueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Evaluate the queue as of the given instant. Pure with respect to
    /// its inputs: identical payloads and `as_of` yield an identical
    /// report.
    pub fn evaluate(
        &self,
        conversations: &[Conversation],
        roster: &[TeamMember],
        as_of: UnixSeconds,
    ) -> QueueHealthReport {
        // Step 1: Fold conversations into per-agent records.
        let aggregation = aggregate::aggregate(conversations, roster, &self.config, as_of);
        debug!(
            agents = aggregation.agents.len(),
            unassigned = aggregation.unassigned.total,
            excluded = aggregation.excluded.total,
            total_open = aggregation.total_open,
            "aggregated conversations"
        );

        // Step 2: Classify each record and roll up the cohort.
        let statuses: FxHashMap<AgentId, Status> = aggregation
            .agents
            .iter()
            .map(|(&id, record)| (id, status::classify(record, &self.config)))
            .collect();
        let cohort = CohortSummary::compute(aggregation.agents.values(), &self.config);

        // Step 3: Fire threshold alerts. The aggregation already routed
        // excluded and unassigned conversations away from agent records.
        let alerts = alerts::evaluate_all(aggregation.agents.values(), &self.config);

        info!(
            cohort_size = cohort.cohort_size,
            on_track_pct = cohort.on_track_pct,
            alerts = alerts.len(),
            "queue evaluated"
        );

        QueueHealthReport {
            aggregation,
            statuses,
            cohort,
            alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversations(json: &str) -> Vec<Conversation> {
        serde_json::from_str(json).unwrap()
    }

    fn roster(json: &str) -> Vec<TeamMember> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn invalid_thresholds_fail_construction() {
        let config = QueueConfig {
            max_open_soft: Some(6),
            max_open_alert: Some(6),
            ..QueueConfig::default()
        };
        assert!(QueueHealthEngine::new(config).is_err());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let engine = QueueHealthEngine::new(QueueConfig::default()).unwrap();
        let convs = conversations(
            r#"[
                {"id":"c1","state":"open","admin_assignee_id":1},
                {"id":"c2","state":"snoozed","admin_assignee_id":1,
                 "tags":["snooze.waiting-on-tse"]}
            ]"#,
        );
        let team = roster(r#"[{"id":1,"name":"Ana"}]"#);

        let first = engine.evaluate(&convs, &team, 1_700_000_000);
        let second = engine.evaluate(&convs, &team, 1_700_000_000);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn report_ties_status_and_alerts_to_the_same_records() {
        let engine = QueueHealthEngine::new(QueueConfig::default()).unwrap();
        let convs = conversations(
            r#"[
                {"id":"c1","state":"open","admin_assignee_id":1},
                {"id":"c2","state":"open","admin_assignee_id":1},
                {"id":"c3","state":"open","admin_assignee_id":1},
                {"id":"c4","state":"open","admin_assignee_id":1},
                {"id":"c5","state":"open","admin_assignee_id":1},
                {"id":"c6","state":"open","admin_assignee_id":1},
                {"id":"c7","state":"open","admin_assignee_id":1}
            ]"#,
        );
        let team = roster(r#"[{"id":1,"name":"Ana"},{"id":2,"name":"Ravi"}]"#);

        let report = engine.evaluate(&convs, &team, 1_700_000_000);
        assert_eq!(report.statuses[&1], Status::OverLimit);
        assert_eq!(report.statuses[&2], Status::Outstanding);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].agent_id, 1);
        assert_eq!(report.cohort.on_track_pct, 50);
    }
}
