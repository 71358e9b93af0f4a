//! Personalized sleep baselines
//!
//! This module scores a night of sleep against the user's own rolling baseline
//! instead of population thresholds. The engine consults a
//! `PersonalizedSleepScorer` first and falls back to the population scorer
//! when it declines to produce an overall score.

use crate::stats::{avg, clamp_score};
use crate::types::{SleepEntry, SleepScoreResult, SleepScoreSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default baseline window in nights
pub const DEFAULT_BASELINE_WINDOW: usize = 14;

/// Nights of history required before an overall score is produced
pub const MIN_BASELINE_NIGHTS: u32 = 3;

const NEUTRAL_SUB_SCORE: f64 = 70.0;
const SUB_SCORE_FLOOR: f64 = 25.0;

/// Sub-scores from a personalized sleep scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedSleepScore {
    /// Overall score, `None` when the scorer has too little history
    pub overall: Option<u8>,
    pub duration: f64,
    pub sleep_quality: f64,
    pub heart_health: f64,
}

impl PersonalizedSleepScore {
    /// Convert into a pillar result; `None` without an overall score
    pub fn into_result(self, avg_duration_minutes: f64) -> Option<SleepScoreResult> {
        let score = self.overall?;
        Some(SleepScoreResult {
            score,
            duration_score: self.duration,
            restorative_score: self.sleep_quality,
            heart_score: self.heart_health,
            consistency_bonus: 0,
            avg_duration_minutes,
            scorer: SleepScoreSource::Personalized,
        })
    }
}

/// Strategy for per-user sleep scoring, injected into the engine
pub trait PersonalizedSleepScorer: Send + Sync {
    /// Score the night(s) recorded on `date` using all of the user's entries
    fn daily_sleep_score(
        &self,
        date: NaiveDate,
        entries: &[SleepEntry],
    ) -> Option<PersonalizedSleepScore>;
}

/// Baseline values for relative interpretation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepBaselines {
    /// Rolling average sleep duration (minutes)
    pub duration_minutes: Option<f64>,
    /// Rolling average deep + REM percentage
    pub restorative_pct: Option<f64>,
    /// Rolling average resting HR (bpm)
    pub resting_hr: Option<f64>,
    /// Rolling average HRV (ms)
    pub hrv: Option<f64>,
    /// Number of nights used to compute baselines
    pub baseline_days: u32,
}

/// Rolling window of recent nights
#[derive(Debug, Clone)]
pub struct SleepBaselineStore {
    duration_values: VecDeque<f64>,
    restorative_values: VecDeque<f64>,
    rhr_values: VecDeque<f64>,
    hrv_values: VecDeque<f64>,
    window_size: usize,
}

impl Default for SleepBaselineStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_WINDOW)
    }
}

impl SleepBaselineStore {
    /// Create a new baseline store with specified window size
    pub fn new(window_size: usize) -> Self {
        Self {
            duration_values: VecDeque::with_capacity(window_size),
            restorative_values: VecDeque::with_capacity(window_size),
            rhr_values: VecDeque::with_capacity(window_size),
            hrv_values: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// Add one night to the rolling window
    pub fn push(&mut self, entry: &SleepEntry) {
        Self::push_value(
            &mut self.duration_values,
            Some(entry.duration_minutes as f64),
            self.window_size,
        );
        Self::push_value(
            &mut self.restorative_values,
            entry.restorative_pct(),
            self.window_size,
        );
        Self::push_value(&mut self.rhr_values, entry.resting_hr, self.window_size);
        Self::push_value(&mut self.hrv_values, entry.hrv(), self.window_size);
    }

    fn push_value(queue: &mut VecDeque<f64>, value: Option<f64>, window_size: usize) {
        if let Some(v) = value {
            queue.push_back(v);
            while queue.len() > window_size {
                queue.pop_front();
            }
        }
    }

    /// Get current baseline values
    pub fn get_baselines(&self) -> SleepBaselines {
        SleepBaselines {
            duration_minutes: Self::rolling_average(&self.duration_values),
            restorative_pct: Self::rolling_average(&self.restorative_values),
            resting_hr: Self::rolling_average(&self.rhr_values),
            hrv: Self::rolling_average(&self.hrv_values),
            baseline_days: self.duration_values.len() as u32,
        }
    }

    fn rolling_average(queue: &VecDeque<f64>) -> Option<f64> {
        if queue.is_empty() {
            return None;
        }
        let sum: f64 = queue.iter().sum();
        Some(sum / queue.len() as f64)
    }
}

/// Deviation from baseline as a percentage
pub fn calculate_deviation(current: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    match (current, baseline) {
        (Some(curr), Some(base)) if base > 0.0 => Some(((curr - base) / base) * 100.0),
        _ => None,
    }
}

/// Default personalized scorer using a rolling per-user baseline
#[derive(Debug, Clone, Copy)]
pub struct BaselineSleepScorer {
    window_size: usize,
}

impl Default for BaselineSleepScorer {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_WINDOW)
    }
}

impl BaselineSleepScorer {
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    /// Baselines from the most recent nights strictly before `date`
    pub fn baselines(&self, date: NaiveDate, entries: &[SleepEntry]) -> SleepBaselines {
        let mut history: Vec<&SleepEntry> = entries.iter().filter(|e| e.date < date).collect();
        history.sort_by_key(|e| e.date);

        let mut store = SleepBaselineStore::new(self.window_size);
        for entry in history {
            store.push(entry);
        }
        store.get_baselines()
    }
}

fn mean_of(entries: &[&SleepEntry], field: impl Fn(&SleepEntry) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = entries.iter().filter_map(|e| field(*e)).collect();
    avg(&values)
}

/// Short nights cost twice as much as long ones
fn personal_duration_score(deviation: Option<f64>) -> f64 {
    match deviation {
        Some(dev) if dev < 0.0 => (100.0 + dev * 2.0).max(SUB_SCORE_FLOOR),
        Some(dev) => (100.0 - dev).max(SUB_SCORE_FLOOR),
        None => NEUTRAL_SUB_SCORE,
    }
}

fn personal_quality_score(deviation: Option<f64>) -> f64 {
    deviation
        .map(|dev| (80.0 + dev * 0.8).clamp(SUB_SCORE_FLOOR, 100.0))
        .unwrap_or(NEUTRAL_SUB_SCORE)
}

/// Resting HR above baseline and HRV below baseline both lower the score
fn personal_heart_score(rhr_deviation: Option<f64>, hrv_deviation: Option<f64>) -> f64 {
    let parts: Vec<f64> = [
        rhr_deviation.map(|dev| (80.0 - dev * 2.0).clamp(SUB_SCORE_FLOOR, 100.0)),
        hrv_deviation.map(|dev| (80.0 + dev * 0.8).clamp(SUB_SCORE_FLOOR, 100.0)),
    ]
    .into_iter()
    .flatten()
    .collect();
    avg(&parts).unwrap_or(NEUTRAL_SUB_SCORE)
}

impl PersonalizedSleepScorer for BaselineSleepScorer {
    fn daily_sleep_score(
        &self,
        date: NaiveDate,
        entries: &[SleepEntry],
    ) -> Option<PersonalizedSleepScore> {
        let today: Vec<&SleepEntry> = entries.iter().filter(|e| e.date == date).collect();
        if today.is_empty() {
            return None;
        }

        let baselines = self.baselines(date, entries);

        let duration = mean_of(&today, |e| Some(e.duration_minutes as f64));
        let restorative = mean_of(&today, SleepEntry::restorative_pct);
        let rhr = mean_of(&today, |e| e.resting_hr);
        let hrv = mean_of(&today, SleepEntry::hrv);

        let duration_score =
            personal_duration_score(calculate_deviation(duration, baselines.duration_minutes));
        let quality_score =
            personal_quality_score(calculate_deviation(restorative, baselines.restorative_pct));
        let heart_score = personal_heart_score(
            calculate_deviation(rhr, baselines.resting_hr),
            calculate_deviation(hrv, baselines.hrv),
        );

        let overall = if baselines.baseline_days >= MIN_BASELINE_NIGHTS {
            Some(clamp_score(
                duration_score * 0.4 + quality_score * 0.3 + heart_score * 0.3,
            ))
        } else {
            None
        };

        Some(PersonalizedSleepScore {
            overall,
            duration: duration_score,
            sleep_quality: quality_score,
            heart_health: heart_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night(day: u32, minutes: u32, rhr: f64, hrv: f64) -> SleepEntry {
        SleepEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            duration_minutes: minutes,
            deep_sleep_pct: Some(18.0),
            rem_sleep_pct: Some(22.0),
            resting_hr: Some(rhr),
            hrv_low: Some(hrv),
            hrv_high: Some(hrv),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_baseline_accumulation() {
        let mut store = SleepBaselineStore::new(7);
        for i in 0..7 {
            store.push(&night(i + 1, 420 + i * 10, 55.0, 60.0));
        }

        let baselines = store.get_baselines();
        // Average of 420..480 step 10 = 450
        assert!((baselines.duration_minutes.unwrap() - 450.0).abs() < 0.001);
        assert_eq!(baselines.baseline_days, 7);
    }

    #[test]
    fn test_baseline_window_rolling() {
        let mut store = SleepBaselineStore::new(3);
        for i in 0..5 {
            // 60, 70, 80, 90, 100
            store.push(&night(i + 1, 450, 55.0, 60.0 + i as f64 * 10.0));
        }

        let baselines = store.get_baselines();
        assert!((baselines.hrv.unwrap() - 90.0).abs() < 0.001);
        assert_eq!(baselines.baseline_days, 3);
    }

    #[test]
    fn test_deviation_calculation() {
        let dev = calculate_deviation(Some(72.0), Some(60.0)).unwrap();
        assert!((dev - 20.0).abs() < 1e-9);
        assert_eq!(calculate_deviation(None, Some(60.0)), None);
        assert_eq!(calculate_deviation(Some(72.0), Some(0.0)), None);
    }

    #[test]
    fn test_no_entry_today() {
        let entries = [night(1, 450, 55.0, 60.0)];
        assert!(BaselineSleepScorer::default()
            .daily_sleep_score(date(5), &entries)
            .is_none());
    }

    #[test]
    fn test_insufficient_history_has_no_overall() {
        let entries = [night(1, 450, 55.0, 60.0), night(2, 450, 55.0, 60.0)];
        let score = BaselineSleepScorer::default()
            .daily_sleep_score(date(2), &entries)
            .unwrap();
        assert!(score.overall.is_none());
        assert!(score.into_result(450.0).is_none());
    }

    #[test]
    fn test_night_matching_baseline() {
        let entries: Vec<SleepEntry> = (1..=5).map(|d| night(d, 450, 55.0, 60.0)).collect();
        let score = BaselineSleepScorer::default()
            .daily_sleep_score(date(5), &entries)
            .unwrap();
        // Zero deviation everywhere: duration 100, quality 80, heart 80
        assert_eq!(score.overall, Some(88));

        let result = score.into_result(450.0).unwrap();
        assert_eq!(result.scorer, SleepScoreSource::Personalized);
        assert_eq!(result.score, 88);
    }

    #[test]
    fn test_short_night_scores_lower() {
        let mut entries: Vec<SleepEntry> = (1..=4).map(|d| night(d, 480, 55.0, 60.0)).collect();
        entries.push(night(5, 360, 55.0, 60.0));
        let score = BaselineSleepScorer::default()
            .daily_sleep_score(date(5), &entries)
            .unwrap();
        // 25% short of baseline costs 50 points of duration
        assert!((score.duration - 50.0).abs() < 1e-9);
        assert!(score.overall.unwrap() < 88);
    }

    #[test]
    fn test_elevated_resting_hr_lowers_heart_score() {
        let mut entries: Vec<SleepEntry> = (1..=4).map(|d| night(d, 450, 50.0, 60.0)).collect();
        entries.push(night(5, 450, 55.0, 60.0));
        let score = BaselineSleepScorer::default()
            .daily_sleep_score(date(5), &entries)
            .unwrap();
        // RHR +10% -> 60, HRV unchanged -> 80
        assert!((score.heart_health - 70.0).abs() < 1e-9);
    }
}
