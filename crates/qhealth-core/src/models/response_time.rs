//! Daily response-time metric payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A conversation whose first reply took ten minutes or longer, reported
/// individually for drill-down.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlowConversation {
    pub id: String,
    pub wait_time_minutes: f64,
}

/// First-reply latency buckets for one calendar day.
///
/// Percentages are over `total_with_response` (conversations that actually
/// received a first reply), not over all conversations created that day.
/// Field renames pin the persisted wire names.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResponseTimeMetric {
    pub date: Option<NaiveDate>,
    #[serde(rename = "totalConversations")]
    pub total_conversations: u32,
    #[serde(rename = "totalWithResponse")]
    pub total_with_response: u32,
    #[serde(rename = "countUnder5Min")]
    pub count_under_5_min: u32,
    #[serde(rename = "count5to10Min")]
    pub count_5_to_10_min: u32,
    #[serde(rename = "count10PlusMin")]
    pub count_10_plus_min: u32,
    #[serde(rename = "percentageUnder5Min")]
    pub percentage_under_5_min: f64,
    #[serde(rename = "percentage5to10Min")]
    pub percentage_5_to_10_min: f64,
    #[serde(rename = "percentage10PlusMin")]
    pub percentage_10_plus_min: f64,
    #[serde(rename = "conversationIds10PlusMin")]
    pub slow_conversations: Vec<SlowConversation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_persisted_row() {
        let metric: ResponseTimeMetric = serde_json::from_str(
            r#"{
                "date": "2026-08-20",
                "totalConversations": 40,
                "totalWithResponse": 38,
                "countUnder5Min": 30,
                "count5to10Min": 5,
                "count10PlusMin": 3,
                "percentageUnder5Min": 78.95,
                "percentage5to10Min": 13.16,
                "percentage10PlusMin": 7.89,
                "conversationIds10PlusMin": [{"id":"c9","waitTimeMinutes":12.5}]
            }"#,
        )
        .unwrap();
        assert_eq!(metric.count_10_plus_min, 3);
        assert_eq!(metric.slow_conversations[0].id, "c9");
    }
}
