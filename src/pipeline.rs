//! Pipeline orchestration
//!
//! This module provides the public API for Vitals Score. It filters each
//! signal to the target day, projects pillars that have no same-day data,
//! then runs weighting, cross-metric adjustment, the critical floor and
//! insight generation.

use crate::baseline::PersonalizedSleepScorer;
use crate::config::EngineConfig;
use crate::cross_metric::calculate_cross_metric_adjustment;
use crate::error::ComputeError;
use crate::floor::{critical_floor_cap, finalize_score};
use crate::insights::{generate_insights, PillarResults};
use crate::pillars::{calculate_activity_pillar_score, calculate_bp_score, calculate_sleep_health_score};
use crate::projector::{daily_scores, project_score};
use crate::stats::avg;
use crate::training_load::{RollingLoadModel, TrainingLoadModel};
use crate::types::{
    Activity, BpReading, BpScoreResult, HealthScoreResult, PillarScore, PillarValues, SleepEntry,
    SleepScoreResult,
};
use crate::weighting::calculate_dynamic_weights;
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

/// Days covered by a range request that gives no start date
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Longest range a single `score_range` call accepts
pub const MAX_RANGE_DAYS: i64 = 366;

/// Compute the health score for one day with the default engine.
///
/// # Arguments
/// * `bp_readings` - All of the user's blood pressure readings
/// * `sleep_entries` - All of the user's sleep entries
/// * `activities` - All of the user's activities
/// * `target_date` - Day to score
///
/// # Example
/// ```ignore
/// let result = calculate_health_score(&readings, &[], &[], date);
/// println!("{}", result.overall);
/// ```
pub fn calculate_health_score(
    bp_readings: &[BpReading],
    sleep_entries: &[SleepEntry],
    activities: &[Activity],
    target_date: NaiveDate,
) -> HealthScoreResult {
    HealthScoreEngine::new().calculate(bp_readings, sleep_entries, activities, target_date)
}

/// Compute today's health score (local date) with the default engine
pub fn calculate_health_score_today(
    bp_readings: &[BpReading],
    sleep_entries: &[SleepEntry],
    activities: &[Activity],
) -> HealthScoreResult {
    calculate_health_score(bp_readings, sleep_entries, activities, today())
}

/// Score a JSON request and return the result as JSON.
///
/// # Example
/// ```ignore
/// let json = health_score_json(r#"{"bp_readings": [], "target_date": "2024-06-01"}"#.to_string())?;
/// ```
pub fn health_score_json(request_json: String) -> Result<String, ComputeError> {
    HealthScoreEngine::new().calculate_json(&request_json)
}

/// Score every day of a JSON range request and return a JSON array
pub fn health_score_range_json(request_json: String) -> Result<String, ComputeError> {
    HealthScoreEngine::new().score_range_json(&request_json)
}

/// JSON request accepted by the JSON, FFI and CLI entry points
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub bp_readings: Vec<BpReading>,
    #[serde(default)]
    pub sleep_entries: Vec<SleepEntry>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Day to score (YYYY-MM-DD); defaults to today
    #[serde(default)]
    pub target_date: Option<String>,
    /// First day of a range request (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of a range request (YYYY-MM-DD); defaults to today
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ScoreRequest {
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Target date, or today when absent
    pub fn target(&self) -> Result<NaiveDate, ComputeError> {
        self.target_date
            .as_deref()
            .map(parse_date)
            .unwrap_or_else(|| Ok(today()))
    }

    /// Inclusive range; the start defaults to 30 days ending at `end`
    pub fn range(&self) -> Result<(NaiveDate, NaiveDate), ComputeError> {
        let end = match self.end_date.as_deref().or(self.target_date.as_deref()) {
            Some(s) => parse_date(s)?,
            None => today(),
        };
        let start = match self.start_date.as_deref() {
            Some(s) => parse_date(s)?,
            None => end - Duration::days(DEFAULT_RANGE_DAYS - 1),
        };
        Ok((start, end))
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, ComputeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ComputeError::DateParseError(format!("{s}: {e}")))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Health-score engine with injectable collaborators.
///
/// The engine holds no per-user state; one instance can score any number of
/// users and days, from any number of threads.
pub struct HealthScoreEngine {
    config: EngineConfig,
    training_load: Box<dyn TrainingLoadModel>,
    sleep_scorer: Option<Box<dyn PersonalizedSleepScorer>>,
}

impl Default for HealthScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthScoreEngine {
    /// Create an engine with default configuration, the default training-load
    /// model and population-only sleep scoring
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            training_load: Box::new(RollingLoadModel),
            sleep_scorer: None,
        }
    }

    /// Create an engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replace the training-load model
    pub fn with_training_load_model(mut self, model: impl TrainingLoadModel + 'static) -> Self {
        self.training_load = Box::new(model);
        self
    }

    /// Prefer a personalized sleep scorer when enough history exists
    pub fn with_personalized_sleep(mut self, scorer: impl PersonalizedSleepScorer + 'static) -> Self {
        self.sleep_scorer = Some(Box::new(scorer));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the health score for `target_date`
    pub fn calculate(
        &self,
        bp_readings: &[BpReading],
        sleep_entries: &[SleepEntry],
        activities: &[Activity],
        target_date: NaiveDate,
    ) -> HealthScoreResult {
        let bp_score = self.bp_pillar(bp_readings, target_date);
        let sleep_score = self.sleep_pillar(sleep_entries, target_date);
        let activity_score =
            calculate_activity_pillar_score(target_date, activities, self.training_load.as_ref());

        let values = PillarValues::new(
            bp_score.as_ref().map(|p| p.score() as f64),
            sleep_score.as_ref().map(|p| p.score() as f64),
            activity_score.as_ref().map(|a| a.score as f64),
        );

        let weights = calculate_dynamic_weights(&values, &self.config);
        let cross_metric = calculate_cross_metric_adjustment(&values);
        let floor_cap = critical_floor_cap(&values);

        let overall = if weights.pillar_count == 0 {
            0
        } else {
            finalize_score(weights.weighted_score, cross_metric.adjustment, floor_cap)
        };

        let insights = generate_insights(
            &PillarResults {
                bp: bp_score.as_ref(),
                sleep: sleep_score.as_ref(),
                activity: activity_score.as_ref(),
            },
            &cross_metric,
        );

        debug!(
            date = %target_date,
            overall,
            pillars = weights.pillar_count,
            weighted = weights.weighted_score,
            adjustment = cross_metric.adjustment,
            floor_cap = ?floor_cap,
            "health score computed"
        );

        HealthScoreResult {
            date: target_date,
            overall,
            bp_score,
            sleep_score,
            activity_score,
            cross_metric,
            confidence_factor: weights.confidence_factor,
            weighted_score: weights.weighted_score,
            floor_cap,
            primary_driver: insights.primary_driver,
            primary_detractor: insights.primary_detractor,
            action_item: insights.action_item,
        }
    }

    /// Compute one result per day from `start` to `end` inclusive
    pub fn score_range(
        &self,
        bp_readings: &[BpReading],
        sleep_entries: &[SleepEntry],
        activities: &[Activity],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HealthScoreResult>, ComputeError> {
        if end < start {
            return Err(ComputeError::InvalidRange(format!(
                "end {end} is before start {start}"
            )));
        }
        let span = (end - start).num_days() + 1;
        if span > MAX_RANGE_DAYS {
            return Err(ComputeError::InvalidRange(format!(
                "{span} days requested, at most {MAX_RANGE_DAYS} allowed"
            )));
        }

        Ok(start
            .iter_days()
            .take(span as usize)
            .map(|day| self.calculate(bp_readings, sleep_entries, activities, day))
            .collect())
    }

    /// Score a JSON `ScoreRequest` and return pretty-printed JSON
    pub fn calculate_json(&self, request_json: &str) -> Result<String, ComputeError> {
        let request = ScoreRequest::from_json(request_json)?;
        let result = self.calculate(
            &request.bp_readings,
            &request.sleep_entries,
            &request.activities,
            request.target()?,
        );
        Ok(serde_json::to_string_pretty(&result)?)
    }

    /// Score a JSON range request and return a pretty-printed JSON array
    pub fn score_range_json(&self, request_json: &str) -> Result<String, ComputeError> {
        let request = ScoreRequest::from_json(request_json)?;
        let (start, end) = request.range()?;
        let results = self.score_range(
            &request.bp_readings,
            &request.sleep_entries,
            &request.activities,
            start,
            end,
        )?;
        Ok(serde_json::to_string_pretty(&results)?)
    }

    /// History inside the projection window, strictly before `date`
    fn in_window(&self, record_date: NaiveDate, date: NaiveDate) -> bool {
        let age = (date - record_date).num_days();
        age >= 1 && age <= self.config.projection.window_days
    }

    fn bp_pillar(&self, readings: &[BpReading], date: NaiveDate) -> Option<PillarScore<BpScoreResult>> {
        let today: Vec<BpReading> = readings.iter().filter(|r| r.date == date).cloned().collect();
        if let Some(result) = calculate_bp_score(&today) {
            return Some(PillarScore::Measured(result));
        }

        let history: Vec<BpReading> = readings
            .iter()
            .filter(|r| self.in_window(r.date, date))
            .cloned()
            .collect();
        let scores = daily_scores(&history, |r| r.date, |day| {
            calculate_bp_score(day).map(|r| r.score)
        });

        let projected = project_score(&scores, date, &self.config.projection);
        debug!(date = %date, days = scores.len(), projected = projected.is_some(), "bp pillar has no same-day readings");
        projected.map(PillarScore::Projected)
    }

    fn sleep_pillar(
        &self,
        entries: &[SleepEntry],
        date: NaiveDate,
    ) -> Option<PillarScore<SleepScoreResult>> {
        let today: Vec<SleepEntry> = entries.iter().filter(|e| e.date == date).cloned().collect();
        if let Some(result) = self.score_sleep_day(date, entries, &today) {
            return Some(PillarScore::Measured(result));
        }

        let history: Vec<SleepEntry> = entries
            .iter()
            .filter(|e| self.in_window(e.date, date))
            .cloned()
            .collect();
        let scores = daily_scores(&history, |e| e.date, |day| {
            let day_date = day.first()?.date;
            self.score_sleep_day(day_date, entries, day).map(|r| r.score)
        });

        let projected = project_score(&scores, date, &self.config.projection);
        debug!(date = %date, days = scores.len(), projected = projected.is_some(), "sleep pillar has no same-day entry");
        projected.map(PillarScore::Projected)
    }

    /// Personalized score when available and trusted, population otherwise
    fn score_sleep_day(
        &self,
        date: NaiveDate,
        all_entries: &[SleepEntry],
        day: &[SleepEntry],
    ) -> Option<SleepScoreResult> {
        if day.is_empty() {
            return None;
        }

        if let Some(scorer) = &self.sleep_scorer {
            let history_nights = all_entries.iter().filter(|e| e.date < date).count();
            if history_nights >= self.config.min_personalized_sleep_history {
                let durations: Vec<f64> = day.iter().map(|e| e.duration_minutes as f64).collect();
                let personalized = scorer
                    .daily_sleep_score(date, all_entries)
                    .and_then(|p| p.into_result(avg(&durations).unwrap_or(0.0)));
                if personalized.is_some() {
                    return personalized;
                }
            }
        }

        calculate_sleep_health_score(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{BaselineSleepScorer, PersonalizedSleepScore};
    use crate::types::{BpCategory, ProjectionMethod, SleepScoreSource};
    use pretty_assertions::assert_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn bp(d: u32, systolic: u32, diastolic: u32) -> BpReading {
        BpReading {
            date: date(d),
            systolic,
            diastolic,
            pulse: Some(64),
        }
    }

    fn night(d: u32, minutes: u32) -> SleepEntry {
        SleepEntry {
            date: date(d),
            duration_minutes: minutes,
            deep_sleep_pct: Some(20.0),
            rem_sleep_pct: Some(22.0),
            resting_hr: Some(54.0),
            hrv_low: Some(55.0),
            hrv_high: Some(75.0),
        }
    }

    fn workout(d: u32, minutes: u32, intensity: u8) -> Activity {
        Activity {
            date: date(d),
            duration_minutes: minutes,
            intensity,
            activity_type: "run".to_string(),
        }
    }

    #[test]
    fn test_single_optimal_reading() {
        let result = calculate_health_score(&[bp(15, 110, 70)], &[], &[], date(15));

        let bp_result = result.bp_score.as_ref().and_then(|p| p.measured()).unwrap();
        assert_eq!(bp_result.category, BpCategory::Optimal);
        assert_eq!(result.confidence_factor, 0.85);
        assert!(result.overall > 0);
        assert!(result.sleep_score.is_none());
        assert!(result.activity_score.is_none());
        // 100 * 0.85 + 65 * 0.15 = 94.75
        assert_eq!(result.overall, 95);
    }

    #[test]
    fn test_no_data_at_all() {
        let result = calculate_health_score(&[], &[], &[], date(15));
        assert_eq!(result.overall, 0);
        assert_eq!(result.confidence_factor, 0.0);
        assert!(result.bp_score.is_none());
        assert!(result.sleep_score.is_none());
        assert!(result.activity_score.is_none());
        assert_eq!(result.primary_driver, crate::insights::NO_DATA_DRIVER);
    }

    #[test]
    fn test_is_idempotent() {
        let readings = [bp(13, 122, 80), bp(14, 125, 82), bp(15, 118, 78)];
        let nights = [night(14, 420), night(15, 460)];
        let activities = [workout(12, 40, 3), workout(15, 30, 2)];

        let first = calculate_health_score(&readings, &nights, &activities, date(15));
        let second = calculate_health_score(&readings, &nights, &activities, date(15));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_all_three_pillars() {
        let activities: Vec<Activity> = (1..=15)
            .filter(|d| d % 2 == 1)
            .map(|d| workout(d, 45, 3))
            .collect();
        let result = calculate_health_score(
            &[bp(15, 112, 72)],
            &[night(15, 480)],
            &activities,
            date(15),
        );
        assert_eq!(result.confidence_factor, 1.0);
        assert!(result.activity_score.is_some());
        assert!(result.overall >= 80);
        assert!(!result.cross_metric.reasons.is_empty());
    }

    #[test]
    fn test_critical_floor() {
        let activities: Vec<Activity> = (1..=15).map(|d| workout(d, 30, 2)).collect();
        let result = calculate_health_score(
            &[bp(15, 190, 120)],
            &[night(15, 480)],
            &activities,
            date(15),
        );
        let bp_score = result.bp_score.as_ref().unwrap().score();
        assert!(bp_score < 30);
        assert_eq!(result.floor_cap, Some(45));
        assert!(result.overall <= 45);
    }

    #[test]
    fn test_sleep_is_projected_from_history() {
        let nights: Vec<SleepEntry> = (10..=14).map(|d| night(d, 470)).collect();
        let result = calculate_health_score(&[], &nights, &[], date(15));

        match result.sleep_score {
            Some(PillarScore::Projected(projected)) => {
                assert_eq!(projected.points_used, 5);
                assert_eq!(projected.method, ProjectionMethod::Regression);
                assert!(projected.score > 80);
            }
            other => panic!("expected projected sleep score, got {other:?}"),
        }
        assert_eq!(result.confidence_factor, 0.85);
    }

    #[test]
    fn test_bp_projection_needs_recent_history() {
        let old: Vec<BpReading> = (1..=4).map(|d| bp(d, 118, 76)).collect();
        let target = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let result = calculate_health_score(&old, &[], &[], target);
        assert!(result.bp_score.is_none());
    }

    #[test]
    fn test_activity_from_history_only() {
        // No activity on the target day, but recent history exists
        let activities = [workout(10, 60, 4), workout(12, 45, 3)];
        let result = calculate_health_score(&[], &[], &activities, date(15));
        let activity = result.activity_score.unwrap();
        assert!(!activity.active_today);
        assert_eq!(activity.days_since_activity, Some(3));
    }

    #[test]
    fn test_personalized_sleep_supersedes_population() {
        let nights: Vec<SleepEntry> = (10..=15).map(|d| night(d, 450)).collect();
        let engine = HealthScoreEngine::new().with_personalized_sleep(BaselineSleepScorer::default());
        let result = engine.calculate(&[], &nights, &[], date(15));

        let sleep = result.sleep_score.as_ref().and_then(|p| p.measured()).unwrap();
        assert_eq!(sleep.scorer, SleepScoreSource::Personalized);
    }

    #[test]
    fn test_personalized_sleep_needs_history() {
        let nights = [night(14, 450), night(15, 450)];
        let engine = HealthScoreEngine::new().with_personalized_sleep(BaselineSleepScorer::default());
        let result = engine.calculate(&[], &nights, &[], date(15));

        let sleep = result.sleep_score.as_ref().and_then(|p| p.measured()).unwrap();
        assert_eq!(sleep.scorer, SleepScoreSource::Population);
    }

    struct DecliningScorer;

    impl PersonalizedSleepScorer for DecliningScorer {
        fn daily_sleep_score(
            &self,
            _date: NaiveDate,
            _entries: &[SleepEntry],
        ) -> Option<PersonalizedSleepScore> {
            Some(PersonalizedSleepScore {
                overall: None,
                duration: 0.0,
                sleep_quality: 0.0,
                heart_health: 0.0,
            })
        }
    }

    #[test]
    fn test_null_personalized_overall_falls_back() {
        let nights: Vec<SleepEntry> = (10..=15).map(|d| night(d, 450)).collect();
        let engine = HealthScoreEngine::new().with_personalized_sleep(DecliningScorer);
        let result = engine.calculate(&[], &nights, &[], date(15));

        let sleep = result.sleep_score.as_ref().and_then(|p| p.measured()).unwrap();
        assert_eq!(sleep.scorer, SleepScoreSource::Population);
    }

    struct AlwaysOverreaching;

    impl TrainingLoadModel for AlwaysOverreaching {
        fn training_load(&self, _date: NaiveDate, _activities: &[Activity]) -> crate::types::TrainingLoad {
            crate::types::TrainingLoad {
                score: 200.0,
                days_since_activity: Some(0),
            }
        }

        fn load_level(&self, _score: f64) -> crate::types::TrainingLoadLevel {
            crate::types::TrainingLoadLevel::Overreaching
        }

        fn consistency_multiplier(&self, _activities: &[Activity], _date: NaiveDate) -> f64 {
            1.1
        }
    }

    #[test]
    fn test_injected_training_load_model() {
        let engine = HealthScoreEngine::new().with_training_load_model(AlwaysOverreaching);
        let result = engine.calculate(&[], &[], &[workout(15, 30, 2)], date(15));
        let activity = result.activity_score.unwrap();
        assert_eq!(activity.level, crate::types::TrainingLoadLevel::Overreaching);
        assert!(result.action_item.contains("rest"));
    }

    #[test]
    fn test_custom_weights() {
        let mut config = EngineConfig::default();
        config.neutral_baseline = 50.0;
        let engine = HealthScoreEngine::with_config(config).unwrap();
        let result = engine.calculate(&[bp(15, 110, 70)], &[], &[], date(15));
        // 100 * 0.85 + 50 * 0.15 = 92.5
        assert!((result.weighted_score - 92.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.weights.sleep = -1.0;
        assert!(HealthScoreEngine::with_config(config).is_err());
    }

    #[test]
    fn test_score_range() {
        let readings: Vec<BpReading> = (1..=10).map(|d| bp(d, 120, 78)).collect();
        let engine = HealthScoreEngine::new();
        let results = engine
            .score_range(&readings, &[], &[], date(1), date(10))
            .unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].date, date(1));
        assert_eq!(results[9].date, date(10));
        assert!(results.iter().all(|r| r.bp_score.is_some()));
    }

    #[test]
    fn test_score_range_rejects_reversed_and_huge_ranges() {
        let engine = HealthScoreEngine::new();
        assert!(matches!(
            engine.score_range(&[], &[], &[], date(10), date(1)),
            Err(ComputeError::InvalidRange(_))
        ));
        let far = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert!(matches!(
            engine.score_range(&[], &[], &[], date(1), far),
            Err(ComputeError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_measured_sleep_json_round_trip() {
        let result = calculate_health_score(&[], &[night(15, 480)], &[], date(15));
        let json = serde_json::to_string(&result).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sleep_score"]["source"], "measured");
        assert_eq!(value["sleep_score"]["scorer"], "population");

        let decoded: HealthScoreResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.sleep_score, result.sleep_score);
        assert_eq!(decoded.overall, result.overall);
        assert!(decoded.sleep_score.unwrap().measured().is_some());
    }

    #[test]
    fn test_health_score_json() {
        let request = r#"{
            "bp_readings": [{"date": "2024-06-15", "systolic": 110, "diastolic": 70}],
            "target_date": "2024-06-15"
        }"#;
        let json = health_score_json(request.to_string()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["date"], "2024-06-15");
        assert_eq!(value["overall"], 95);
        assert_eq!(value["bp_score"]["source"], "measured");
        assert_eq!(value["bp_score"]["category"], "Optimal");
        assert!(value["sleep_score"].is_null());
    }

    #[test]
    fn test_range_json_defaults_to_thirty_days() {
        let request = r#"{"end_date": "2024-06-30"}"#;
        let json = health_score_range_json(request.to_string()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let days = value.as_array().unwrap();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0]["date"], "2024-06-01");
    }

    #[test]
    fn test_invalid_date() {
        let result = health_score_json(r#"{"target_date": "15/06/2024"}"#.to_string());
        assert!(matches!(result, Err(ComputeError::DateParseError(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = health_score_json("not valid json".to_string());
        assert!(matches!(result, Err(ComputeError::JsonError(_))));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = HealthScoreEngine::new().with_personalized_sleep(BaselineSleepScorer::default());
        let readings = [bp(15, 128, 84)];
        let expected = engine.calculate(&readings, &[], &[], date(15));

        let engine = &engine;
        let readings = &readings;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || engine.calculate(readings, &[], &[], date(15))))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
