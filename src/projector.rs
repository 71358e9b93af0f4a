//! Score projection
//!
//! Forecasts a pillar score for a day with no direct data by regressing over
//! the trailing window of scored days, then trusting the trend less the longer
//! it has been since the last real data point.

use crate::config::ProjectionConfig;
use crate::stats::{avg, clamp_score, linear_regression};
use crate::types::{DailyScore, ProjectedScore, ProjectionMethod};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Score every day that has direct data, one score per day.
///
/// Records are grouped by date and each day's subset is passed to `scorer`.
/// Days for which the scorer returns `None` are skipped.
pub fn daily_scores<T, D, S>(records: &[T], date_of: D, scorer: S) -> Vec<DailyScore>
where
    T: Clone,
    D: Fn(&T) -> NaiveDate,
    S: Fn(&[T]) -> Option<u8>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for record in records {
        by_day.entry(date_of(record)).or_default().push(record.clone());
    }

    by_day
        .into_iter()
        .filter_map(|(date, day)| scorer(&day).map(|score| DailyScore { date, score }))
        .collect()
}

/// Weight given to the regression for a given staleness (days since the last
/// real point); the remainder goes to the trailing mean.
fn regression_weight(days_since_last: i64) -> f64 {
    match days_since_last {
        d if d <= 3 => 1.0,
        d if d <= 7 => 0.75,
        d if d <= 14 => 0.5,
        _ => 0.0,
    }
}

/// Project a score for `target` from historical daily scores.
///
/// Only points strictly before `target` and within `config.window_days` are
/// used; fewer than `config.min_points` of them yields `None`.
pub fn project_score(
    history: &[DailyScore],
    target: NaiveDate,
    config: &ProjectionConfig,
) -> Option<ProjectedScore> {
    let mut window: Vec<DailyScore> = history
        .iter()
        .copied()
        .filter(|p| {
            let age = (target - p.date).num_days();
            age >= 1 && age <= config.window_days
        })
        .collect();

    if window.len() < config.min_points {
        debug!(
            points = window.len(),
            required = config.min_points,
            "not enough history to project"
        );
        return None;
    }

    window.sort_by_key(|p| p.date);
    let earliest = window[0].date;
    let latest = window[window.len() - 1].date;

    let points: Vec<(f64, f64)> = window
        .iter()
        .map(|p| ((p.date - earliest).num_days() as f64, p.score as f64))
        .collect();
    let scores: Vec<f64> = points.iter().map(|(_, y)| *y).collect();

    let fit = linear_regression(&points)?;
    let trailing_mean = avg(&scores)?;
    let prediction = fit.predict((target - earliest).num_days() as f64);

    let days_since_last = (target - latest).num_days();
    let weight = regression_weight(days_since_last);
    let projected = prediction * weight + trailing_mean * (1.0 - weight);

    let method = if weight >= 1.0 {
        ProjectionMethod::Regression
    } else if weight > 0.0 {
        ProjectionMethod::Blended
    } else {
        ProjectionMethod::TrailingMean
    };

    debug!(
        points = window.len(),
        days_since_last,
        slope = fit.slope,
        prediction,
        trailing_mean,
        ?method,
        "projected pillar score"
    );

    Some(ProjectedScore {
        score: clamp_score(projected),
        points_used: window.len(),
        days_since_last,
        method,
    })
}
