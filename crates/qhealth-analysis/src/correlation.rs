//! Pearson correlation between compliance and response-time series.

use chrono::NaiveDate;
use serde::Serialize;

use qhealth_core::types::collections::FxHashMap;

/// Fewer paired days than this and the coefficient is meaningless.
const MIN_PAIRED_DAYS: usize = 3;

/// Threshold at which a day counts toward the high-performing cohort for
/// the improvement-potential estimate.
const HIGH_PERFORMANCE_ON_TRACK_PCT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl Strength {
    fn from_coefficient(r: f64) -> Strength {
        let magnitude = r.abs();
        if magnitude < 0.3 {
            Strength::Weak
        } else if magnitude < 0.7 {
            Strength::Moderate
        } else {
            Strength::Strong
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Negative,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub strength: Strength,
    pub direction: Direction,
    /// Number of dates present in both input series.
    pub paired_days: usize,
    /// Mean slow % over all paired days minus mean slow % over paired days
    /// with on-track ≥ 80. Positive means high-performing days already
    /// reply faster, so upside exists. `None` when no day qualifies.
    pub improvement_potential: Option<f64>,
}

/// Correlate daily on-track percentages with daily slow-response
/// percentages, joined by date. Returns `None` with fewer than three
/// paired days.
pub fn correlate(
    on_track: &[(NaiveDate, f64)],
    slow_response: &[(NaiveDate, f64)],
) -> Option<CorrelationResult> {
    let slow_by_date: FxHashMap<NaiveDate, f64> = slow_response.iter().copied().collect();
    let pairs: Vec<(f64, f64)> = on_track
        .iter()
        .filter_map(|&(date, pct)| Some((pct, *slow_by_date.get(&date)?)))
        .collect();

    if pairs.len() < MIN_PAIRED_DAYS {
        return None;
    }

    let coefficient = pearson(&pairs);
    let direction = if coefficient > 0.0 {
        Direction::Positive
    } else if coefficient < 0.0 {
        Direction::Negative
    } else {
        Direction::Flat
    };

    Some(CorrelationResult {
        coefficient,
        strength: Strength::from_coefficient(coefficient),
        direction,
        paired_days: pairs.len(),
        improvement_potential: improvement_potential(&pairs),
    })
}

/// Covariance over the product of standard deviations. A flat series has
/// zero variance and no defined correlation; report it as zero rather
/// than NaN.
fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    covariance / denominator
}

fn improvement_potential(pairs: &[(f64, f64)]) -> Option<f64> {
    let overall_mean = pairs.iter().map(|p| p.1).sum::<f64>() / pairs.len() as f64;

    let high_days: Vec<f64> = pairs
        .iter()
        .filter(|p| p.0 >= HIGH_PERFORMANCE_ON_TRACK_PCT)
        .map(|p| p.1)
        .collect();
    if high_days.is_empty() {
        return None;
    }
    let high_mean = high_days.iter().sum::<f64>() / high_days.len() as f64;
    Some(overall_mean - high_mean)
}
