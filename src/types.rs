//! Core types for the Vitals Score engine
//!
//! This module defines the records the engine consumes (blood-pressure readings,
//! sleep entries, activities), the per-pillar results it produces, and the final
//! composite `HealthScoreResult`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independent signal categories combined into the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    BloodPressure,
    Sleep,
    Activity,
}

impl Pillar {
    /// Human-readable label used in insight text
    pub fn label(&self) -> &'static str {
        match self {
            Pillar::BloodPressure => "Blood pressure",
            Pillar::Sleep => "Sleep",
            Pillar::Activity => "Activity",
        }
    }
}

/// A single blood pressure measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpReading {
    /// Calendar date of the reading (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Systolic pressure (mmHg)
    pub systolic: u32,
    /// Diastolic pressure (mmHg)
    pub diastolic: u32,
    /// Pulse (bpm)
    #[serde(default)]
    pub pulse: Option<u32>,
}

/// One night of sleep telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    /// Date the sleep is attributed to (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Total sleep duration (minutes)
    pub duration_minutes: u32,
    /// Deep sleep as a percentage of total sleep
    #[serde(default)]
    pub deep_sleep_pct: Option<f64>,
    /// REM sleep as a percentage of total sleep
    #[serde(default)]
    pub rem_sleep_pct: Option<f64>,
    /// Resting heart rate during sleep (bpm)
    #[serde(default)]
    pub resting_hr: Option<f64>,
    /// Lower bound of overnight HRV (ms)
    #[serde(default)]
    pub hrv_low: Option<f64>,
    /// Upper bound of overnight HRV (ms)
    #[serde(default)]
    pub hrv_high: Option<f64>,
}

impl SleepEntry {
    /// Deep + REM percentage, if any stage data is present
    pub fn restorative_pct(&self) -> Option<f64> {
        match (self.deep_sleep_pct, self.rem_sleep_pct) {
            (None, None) => None,
            (deep, rem) => Some(deep.unwrap_or(0.0) + rem.unwrap_or(0.0)),
        }
    }

    /// Midpoint of the reported HRV range, or whichever bound is present
    pub fn hrv(&self) -> Option<f64> {
        match (self.hrv_low, self.hrv_high) {
            (Some(low), Some(high)) => Some((low + high) / 2.0),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        }
    }
}

/// A logged physical activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Date the activity took place (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Duration (minutes)
    pub duration_minutes: u32,
    /// Perceived intensity, 1 (easy) to 5 (max)
    pub intensity: u8,
    /// Free-form activity type (e.g. "run", "walk")
    #[serde(default)]
    pub activity_type: String,
}

/// A pillar score for one historical day, the unit the projector regresses over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub score: u8,
}

/// AHA-style blood pressure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BpCategory {
    Optimal,
    Normal,
    Elevated,
    #[serde(rename = "Stage 1")]
    Stage1,
    #[serde(rename = "Stage 2")]
    Stage2,
}

impl fmt::Display for BpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BpCategory::Optimal => write!(f, "Optimal"),
            BpCategory::Normal => write!(f, "Normal"),
            BpCategory::Elevated => write!(f, "Elevated"),
            BpCategory::Stage1 => write!(f, "Stage 1"),
            BpCategory::Stage2 => write!(f, "Stage 2"),
        }
    }
}

/// Blood pressure pillar result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpScoreResult {
    /// Final BP score (0-100)
    pub score: u8,
    /// Category from the averaged, unrounded values
    pub category: BpCategory,
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
    pub avg_pulse: Option<f64>,
    /// min(systolic curve, diastolic curve) before modifiers
    pub base_score: f64,
    /// 0, 5, 10 or 15
    pub variability_penalty: u8,
    /// -10, -5, 0, +5 or +10
    pub trend_modifier: i8,
    pub reading_count: usize,
}

/// Where a sleep score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepScoreSource {
    /// Population thresholds
    Population,
    /// Per-user rolling baseline
    Personalized,
}

/// Sleep pillar result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScoreResult {
    /// Final sleep score (0-100)
    pub score: u8,
    pub duration_score: f64,
    /// Deep + REM sub-score ("sleep quality" for personalized results)
    pub restorative_score: f64,
    pub heart_score: f64,
    /// -5, 0 or +5
    pub consistency_bonus: i8,
    pub avg_duration_minutes: f64,
    /// Which scorer produced the result
    pub scorer: SleepScoreSource,
}

/// Training-load classification reported by a `TrainingLoadModel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLoadLevel {
    Detraining,
    Maintaining,
    Building,
    Peak,
    Overreaching,
}

/// Output of a training-load calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoad {
    /// Load score (unbounded, model-specific scale)
    pub score: f64,
    /// Days since the most recent activity, `None` if there is none
    pub days_since_activity: Option<i64>,
}

/// Activity pillar result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityScoreResult {
    /// Final activity score (0-100)
    pub score: u8,
    /// Training-load status sub-score (50%)
    pub load_status_score: f64,
    /// Effort appropriateness sub-score (30%)
    pub effort_score: f64,
    /// Consistency sub-score (20%)
    pub consistency_score: f64,
    pub level: TrainingLoadLevel,
    pub training_load: f64,
    pub active_today: bool,
    pub days_since_activity: Option<i64>,
    pub consistency_multiplier: f64,
}

/// How a projected score was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    /// Raw regression prediction
    Regression,
    /// Regression blended with the trailing mean
    Blended,
    /// Trailing mean only; the trend was too stale
    TrailingMean,
}

/// A pillar score forecast for a day without direct data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedScore {
    pub score: u8,
    /// Number of historical days used
    pub points_used: usize,
    /// Days between the most recent real data point and the target date
    pub days_since_last: i64,
    pub method: ProjectionMethod,
}

/// A pillar result that is either measured on the day or projected from history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PillarScore<T> {
    Measured(T),
    Projected(ProjectedScore),
}

impl PillarScore<BpScoreResult> {
    pub fn score(&self) -> u8 {
        match self {
            PillarScore::Measured(r) => r.score,
            PillarScore::Projected(p) => p.score,
        }
    }
}

impl PillarScore<SleepScoreResult> {
    pub fn score(&self) -> u8 {
        match self {
            PillarScore::Measured(r) => r.score,
            PillarScore::Projected(p) => p.score,
        }
    }
}

impl<T> PillarScore<T> {
    pub fn is_projected(&self) -> bool {
        matches!(self, PillarScore::Projected(_))
    }

    pub fn measured(&self) -> Option<&T> {
        match self {
            PillarScore::Measured(r) => Some(r),
            PillarScore::Projected(_) => None,
        }
    }
}

/// Raw pillar scores handed to the weighter, adjuster and floor guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarValues {
    pub bp: Option<f64>,
    pub sleep: Option<f64>,
    pub activity: Option<f64>,
}

impl PillarValues {
    pub fn new(bp: Option<f64>, sleep: Option<f64>, activity: Option<f64>) -> Self {
        Self {
            bp,
            sleep,
            activity,
        }
    }

    /// Present pillars in fixed order (BP, Sleep, Activity)
    pub fn present(&self) -> Vec<(Pillar, f64)> {
        [
            (Pillar::BloodPressure, self.bp),
            (Pillar::Sleep, self.sleep),
            (Pillar::Activity, self.activity),
        ]
        .into_iter()
        .filter_map(|(pillar, value)| value.map(|v| (pillar, v)))
        .collect()
    }

    pub fn count(&self) -> usize {
        [self.bp, self.sleep, self.activity]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

/// Effective (redistributed) weights; absent pillars carry `None`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectiveWeights {
    pub bp: Option<f64>,
    pub sleep: Option<f64>,
    pub activity: Option<f64>,
}

/// Output of the dynamic weighter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicWeights {
    pub weighted_score: f64,
    pub confidence_factor: f64,
    pub effective_weights: EffectiveWeights,
    pub pillar_count: usize,
}

/// Output of the cross-metric adjuster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossMetricResult {
    /// Clamped total adjustment in [-10, +7]
    pub adjustment: i32,
    /// Reason for every triggered rule, in rule-table order
    pub reasons: Vec<String>,
    /// Subset of `reasons` whose rule carried a penalty
    pub penalty_reasons: Vec<String>,
}

/// Ranked natural-language explanation of a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub primary_driver: String,
    pub primary_detractor: String,
    pub action_item: String,
}

/// The engine's composite output for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreResult {
    pub date: NaiveDate,
    /// Final health score (0-100)
    pub overall: u8,
    pub bp_score: Option<PillarScore<BpScoreResult>>,
    pub sleep_score: Option<PillarScore<SleepScoreResult>>,
    pub activity_score: Option<ActivityScoreResult>,
    pub cross_metric: CrossMetricResult,
    pub confidence_factor: f64,
    /// Weighted score before cross-metric adjustment and floor
    pub weighted_score: f64,
    /// Cap applied by the critical floor, if any
    pub floor_cap: Option<u8>,
    pub primary_driver: String,
    pub primary_detractor: String,
    pub action_item: String,
}
