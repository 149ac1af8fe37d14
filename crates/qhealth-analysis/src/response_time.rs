//! Daily first-reply latency bucketing.

use chrono::NaiveDate;

use qhealth_core::models::{Conversation, ResponseTimeMetric, SlowConversation};

const FAST_CUTOFF_SECONDS: i64 = 300;
const SLOW_CUTOFF_SECONDS: i64 = 600;

/// Bucket one day's conversations by first-reply latency.
///
/// Latency comes from `Conversation::first_reply_seconds` (the reported
/// reply time when present, otherwise first reply minus creation);
/// conversations with no measurable reply count toward
/// `total_conversations` only. Percentages are over the replied subset,
/// rounded to two decimal places, and conversations at or over the slow
/// cutoff are reported individually for drill-down.
pub fn compute_daily_metric(
    date: NaiveDate,
    conversations: &[Conversation],
) -> ResponseTimeMetric {
    let mut metric = ResponseTimeMetric {
        date: Some(date),
        total_conversations: conversations.len() as u32,
        ..ResponseTimeMetric::default()
    };

    for conv in conversations {
        let Some(seconds) = conv.first_reply_seconds() else {
            continue;
        };
        metric.total_with_response += 1;
        if seconds < FAST_CUTOFF_SECONDS {
            metric.count_under_5_min += 1;
        } else if seconds < SLOW_CUTOFF_SECONDS {
            metric.count_5_to_10_min += 1;
        } else {
            metric.count_10_plus_min += 1;
            metric.slow_conversations.push(SlowConversation {
                id: conv.id.clone().unwrap_or_default(),
                wait_time_minutes: round2(seconds as f64 / 60.0),
            });
        }
    }

    let replied = metric.total_with_response;
    metric.percentage_under_5_min = percentage(metric.count_under_5_min, replied);
    metric.percentage_5_to_10_min = percentage(metric.count_5_to_10_min, replied);
    metric.percentage_10_plus_min = percentage(metric.count_10_plus_min, replied);
    metric
}

fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
