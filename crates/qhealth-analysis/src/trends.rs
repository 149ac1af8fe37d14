//! Trend analysis over persisted daily snapshots and response-time rows.

use chrono::NaiveDate;
use serde::Serialize;

use qhealth_core::models::{AgentSummary, DailySnapshot, ResponseTimeMetric};
use qhealth_core::QueueConfig;

use crate::aggregate::AgentRecord;
use crate::status::CohortSummary;

/// Direction of a day-over-day move, already adjusted for the series'
/// sign convention (a falling slow-response percentage is improving).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Worsening,
    Flat,
}

impl TrendDirection {
    /// Direction for series where larger is better (on-track %).
    fn higher_is_better(delta: f64) -> TrendDirection {
        if delta > 0.0 {
            TrendDirection::Improving
        } else if delta < 0.0 {
            TrendDirection::Worsening
        } else {
            TrendDirection::Flat
        }
    }

    /// Direction for series where smaller is better (slow-response %).
    /// The inversion is spelled out here rather than inferred at call
    /// sites, so a new series has to pick a convention explicitly.
    fn lower_is_better(delta: f64) -> TrendDirection {
        Self::higher_is_better(-delta)
    }
}

/// One snapshot re-scored with the current thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct CompliancePoint {
    pub date: NaiveDate,
    pub on_track_pct: u32,
    pub open_only_pct: u32,
    pub waiting_only_pct: u32,
    /// Total `open + waiting_on_agent` across all agents that day; the
    /// load measure behind best/worst day.
    pub total_workload: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ComplianceTrend {
    /// Points sorted ascending by date.
    pub points: Vec<CompliancePoint>,
    /// Trailing 3-day moving averages, one per compliance series; the
    /// window widens from one day, so each series has a value for every
    /// point.
    pub on_track_moving_avg: Vec<f64>,
    pub open_only_moving_avg: Vec<f64>,
    pub waiting_only_moving_avg: Vec<f64>,
    /// Most recent minus second-most-recent `on_track_pct`.
    pub delta: Option<f64>,
    pub direction: Option<TrendDirection>,
    /// Lightest day by total workload.
    pub best_day: Option<NaiveDate>,
    /// Heaviest day by total workload.
    pub worst_day: Option<NaiveDate>,
}

/// Re-score historical snapshots against the current thresholds.
///
/// Percentages are recomputed from the embedded per-agent counters rather
/// than trusting any percentage persisted at capture time, so a threshold
/// change re-colors history consistently.
pub fn analyze_compliance(snapshots: &[DailySnapshot], config: &QueueConfig) -> ComplianceTrend {
    let mut points: Vec<CompliancePoint> = snapshots
        .iter()
        .map(|snapshot| score_snapshot(snapshot, config))
        .collect();
    points.sort_by_key(|p| p.date);

    let series: Vec<f64> = points.iter().map(|p| p.on_track_pct as f64).collect();
    let on_track_moving_avg = moving_average(&series, 3);
    let open_only: Vec<f64> = points.iter().map(|p| p.open_only_pct as f64).collect();
    let waiting_only: Vec<f64> = points.iter().map(|p| p.waiting_only_pct as f64).collect();
    let open_only_moving_avg = moving_average(&open_only, 3);
    let waiting_only_moving_avg = moving_average(&waiting_only, 3);
    let delta = day_over_day(&series);
    let direction = delta.map(TrendDirection::higher_is_better);

    let best_day = points
        .iter()
        .min_by_key(|p| (p.total_workload, p.date))
        .map(|p| p.date);
    let worst_day = points
        .iter()
        .max_by_key(|p| (p.total_workload, std::cmp::Reverse(p.date)))
        .map(|p| p.date);

    ComplianceTrend {
        points,
        on_track_moving_avg,
        open_only_moving_avg,
        waiting_only_moving_avg,
        delta,
        direction,
        best_day,
        worst_day,
    }
}

fn score_snapshot(snapshot: &DailySnapshot, config: &QueueConfig) -> CompliancePoint {
    let records: Vec<AgentRecord> = snapshot.agents.iter().map(record_from_summary).collect();
    let summary = CohortSummary::compute(&records, config);
    let total_workload = snapshot
        .agents
        .iter()
        .map(|a| a.open + a.waiting_on_agent)
        .sum();
    CompliancePoint {
        date: snapshot.date,
        on_track_pct: summary.on_track_pct,
        open_only_pct: summary.open_only_pct,
        waiting_only_pct: summary.waiting_only_pct,
        total_workload,
    }
}

fn record_from_summary(summary: &AgentSummary) -> AgentRecord {
    AgentRecord {
        open: summary.open,
        waiting_on_agent: summary.waiting_on_agent,
        waiting_on_customer_resolved: summary.waiting_on_customer_resolved,
        waiting_on_customer_unresolved: summary.waiting_on_customer_unresolved,
        total_snoozed: summary.total_snoozed,
        ..AgentRecord::synthesized(summary.id, summary.name.clone())
    }
}

/// One persisted response-time row reduced to its slow percentage.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseTimePoint {
    pub date: NaiveDate,
    /// Percent of replied conversations whose first reply took ten
    /// minutes or longer.
    pub slow_pct: f64,
    pub total_with_response: u32,
}

/// Last-period versus previous-period averages of the slow percentage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PeriodComparison {
    pub recent_avg: f64,
    pub previous_avg: f64,
    /// `recent_avg − previous_avg`, rounded to the nearest whole point.
    pub change_points: i64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ResponseTimeTrend {
    /// Points sorted ascending by date; undated rows are dropped.
    pub points: Vec<ResponseTimePoint>,
    pub slow_moving_avg: Vec<f64>,
    pub delta: Option<f64>,
    pub direction: Option<TrendDirection>,
    pub period: Option<PeriodComparison>,
}

pub fn analyze_response_time(metrics: &[ResponseTimeMetric]) -> ResponseTimeTrend {
    let mut points: Vec<ResponseTimePoint> = metrics
        .iter()
        .filter_map(|metric| {
            Some(ResponseTimePoint {
                date: metric.date?,
                slow_pct: metric.percentage_10_plus_min,
                total_with_response: metric.total_with_response,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);

    let series: Vec<f64> = points.iter().map(|p| p.slow_pct).collect();
    let slow_moving_avg = moving_average(&series, 3);
    let delta = day_over_day(&series);
    let direction = delta.map(TrendDirection::lower_is_better);
    let period = compare_periods(&series);

    ResponseTimeTrend {
        points,
        slow_moving_avg,
        delta,
        direction,
        period,
    }
}

/// Trailing moving average with a widening window: the first points
/// average over however much history exists instead of being dropped.
fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    series
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &series[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Most recent minus second-most-recent value; None below two points.
fn day_over_day(series: &[f64]) -> Option<f64> {
    let [.., prev, last] = series else {
        return None;
    };
    Some(last - prev)
}

/// Compare the most recent week against the one before it; with fewer
/// than fourteen points, compare the last half against the first half.
fn compare_periods(series: &[f64]) -> Option<PeriodComparison> {
    if series.len() < 2 {
        return None;
    }
    let split = if series.len() >= 14 {
        series.len() - 7
    } else {
        series.len() / 2
    };
    let (previous, recent) = series.split_at(split);
    let previous = if series.len() >= 14 {
        &previous[previous.len() - 7..]
    } else {
        previous
    };

    let recent_avg = mean(recent);
    let previous_avg = mean(previous);
    let change = recent_avg - previous_avg;
    Some(PeriodComparison {
        recent_avg,
        previous_avg,
        change_points: change.round() as i64,
        direction: TrendDirection::lower_is_better(change),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(date: &str, agents: &[(u32, u32, u32)]) -> DailySnapshot {
        DailySnapshot {
            date: date.parse().unwrap(),
            agents: agents
                .iter()
                .enumerate()
                .map(|(i, &(open, waiting, snoozed))| AgentSummary {
                    id: i as i64 + 1,
                    name: format!("Agent {}", i + 1),
                    open,
                    waiting_on_agent: waiting,
                    total_snoozed: snoozed,
                    ..AgentSummary::default()
                })
                .collect(),
        }
    }

    fn metric(date: &str, slow_pct: f64) -> ResponseTimeMetric {
        ResponseTimeMetric {
            date: Some(date.parse().unwrap()),
            percentage_10_plus_min: slow_pct,
            total_with_response: 10,
            ..ResponseTimeMetric::default()
        }
    }

    #[test]
    fn points_sorted_ascending_regardless_of_input_order() {
        let config = QueueConfig::default();
        let snapshots = vec![
            snapshot("2026-08-22", &[(1, 0, 0)]),
            snapshot("2026-08-20", &[(1, 0, 0)]),
            snapshot("2026-08-21", &[(1, 0, 0)]),
        ];
        let trend = analyze_compliance(&snapshots, &config);
        let dates: Vec<String> = trend.points.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, ["2026-08-20", "2026-08-21", "2026-08-22"]);
    }

    #[test]
    fn moving_average_window_widens() {
        let avg = moving_average(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(avg, vec![10.0, 15.0, 20.0, 30.0]);
    }

    #[test]
    fn moving_average_is_stable_across_calls() {
        let series = [3.0, 7.0, 5.0, 9.0];
        assert_eq!(moving_average(&series, 3), moving_average(&series, 3));
    }

    #[test]
    fn every_compliance_series_gets_a_moving_average() {
        let config = QueueConfig::default();
        let snapshots = vec![
            snapshot("2026-08-20", &[(8, 0, 0)]),
            snapshot("2026-08-21", &[(2, 0, 0)]),
            snapshot("2026-08-22", &[(2, 0, 0)]),
        ];
        let trend = analyze_compliance(&snapshots, &config);

        // open_only: 0, 100, 100 → widening averages 0, 50, 200/3.
        assert_eq!(trend.open_only_moving_avg[0], 0.0);
        assert_eq!(trend.open_only_moving_avg[1], 50.0);
        assert!((trend.open_only_moving_avg[2] - 200.0 / 3.0).abs() < 1e-9);
        // waiting never exceeds the limit, so its series stays flat.
        assert_eq!(trend.waiting_only_moving_avg, vec![100.0, 100.0, 100.0]);
        assert_eq!(trend.on_track_moving_avg.len(), trend.points.len());
    }

    #[test]
    fn on_track_delta_direction_is_higher_is_better() {
        let config = QueueConfig::default();
        let snapshots = vec![
            // 0 of 1 agents on track, then 1 of 1.
            snapshot("2026-08-20", &[(8, 0, 0)]),
            snapshot("2026-08-21", &[(2, 0, 0)]),
        ];
        let trend = analyze_compliance(&snapshots, &config);
        assert_eq!(trend.delta, Some(100.0));
        assert_eq!(trend.direction, Some(TrendDirection::Improving));
    }

    #[test]
    fn response_time_direction_is_inverted() {
        let metrics = vec![metric("2026-08-20", 20.0), metric("2026-08-21", 10.0)];
        let trend = analyze_response_time(&metrics);
        assert_eq!(trend.delta, Some(-10.0));
        assert_eq!(trend.direction, Some(TrendDirection::Improving));
    }

    #[test]
    fn best_and_worst_day_by_total_workload() {
        let config = QueueConfig::default();
        let snapshots = vec![
            snapshot("2026-08-20", &[(4, 2, 2)]),
            snapshot("2026-08-21", &[(0, 0, 0)]),
            snapshot("2026-08-22", &[(3, 1, 1)]),
        ];
        let trend = analyze_compliance(&snapshots, &config);
        assert_eq!(trend.best_day, Some("2026-08-21".parse().unwrap()));
        assert_eq!(trend.worst_day, Some("2026-08-20".parse().unwrap()));
    }

    #[test]
    fn undated_metrics_are_dropped() {
        let metrics = vec![ResponseTimeMetric::default(), metric("2026-08-20", 5.0)];
        let trend = analyze_response_time(&metrics);
        assert_eq!(trend.points.len(), 1);
    }

    #[test]
    fn short_history_period_comparison_splits_in_half() {
        let metrics = vec![
            metric("2026-08-18", 30.0),
            metric("2026-08-19", 30.0),
            metric("2026-08-20", 10.0),
            metric("2026-08-21", 10.0),
        ];
        let period = analyze_response_time(&metrics).period.unwrap();
        assert_eq!(period.previous_avg, 30.0);
        assert_eq!(period.recent_avg, 10.0);
        assert_eq!(period.change_points, -20);
        assert_eq!(period.direction, TrendDirection::Improving);
    }

    #[test]
    fn long_history_compares_last_week_to_the_one_before() {
        let mut metrics = Vec::new();
        for day in 1..=14 {
            let slow = if day <= 7 { 10.0 } else { 20.0 };
            metrics.push(metric(&format!("2026-08-{day:02}"), slow));
        }
        let period = analyze_response_time(&metrics).period.unwrap();
        assert_eq!(period.previous_avg, 10.0);
        assert_eq!(period.recent_avg, 20.0);
        assert_eq!(period.change_points, 10);
        assert_eq!(period.direction, TrendDirection::Worsening);
    }

    #[test]
    fn single_point_has_no_delta() {
        let trend = analyze_response_time(&[metric("2026-08-20", 5.0)]);
        assert_eq!(trend.delta, None);
        assert_eq!(trend.direction, None);
        assert!(trend.period.is_none());
    }
}
