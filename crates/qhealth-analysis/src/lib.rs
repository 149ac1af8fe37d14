//! qhealth-analysis — the queue health aggregation engine.
//!
//! Pure computation over in-memory payloads: conversations and a roster in,
//! classified per-agent workload records, alerts, trend lines, streaks, and
//! correlation statistics out. No I/O, no clock reads (the caller passes an
//! explicit `as_of`), and no data-shape errors — malformed inputs degrade
//! to their most conservative classification.

pub mod aggregate;
pub mod alerts;
pub mod correlation;
pub mod engine;
pub mod response_time;
pub mod status;
pub mod streaks;
pub mod tags;
pub mod trends;

pub use aggregate::{AgentRecord, AggregationResult, UnassignedQueue};
pub use alerts::{Alert, AlertKind, Severity};
pub use correlation::{correlate, CorrelationResult, Direction, Strength};
pub use engine::{QueueHealthEngine, QueueHealthReport};
pub use response_time::compute_daily_metric;
pub use status::{classify, CohortSummary, Status};
pub use streaks::{agent_history, detect_streak, rank_streaks, HistoryDay, StreakResult};
pub use tags::{classify_tags, SnoozeCategory};
pub use trends::{
    analyze_compliance, analyze_response_time, ComplianceTrend, ResponseTimeTrend, TrendDirection,
};
