//! Activity pillar
//!
//! Combines training-load status (50%), effort appropriateness for the day
//! (30%) and training consistency (20%). Load analysis is delegated to a
//! `TrainingLoadModel`.

use crate::stats::{clamp_score, lerp};
use crate::training_load::{
    TrainingLoadModel, MAX_CONSISTENCY_MULTIPLIER, MIN_CONSISTENCY_MULTIPLIER,
};
use crate::types::{Activity, ActivityScoreResult, TrainingLoadLevel};
use chrono::NaiveDate;

const LOAD_STATUS_WEIGHT: f64 = 0.50;
const EFFORT_WEIGHT: f64 = 0.30;
const CONSISTENCY_WEIGHT: f64 = 0.20;

/// Load score at which detraining reaches its best band score
const DETRAINING_CEILING_LOAD: f64 = 14.0;

/// Load score where overreaching starts, and where it bottoms out
const OVERREACHING_START_LOAD: f64 = 120.0;
const OVERREACHING_FLOOR_LOAD: f64 = 180.0;

/// Training-load status sub-score
pub fn load_status_score(level: TrainingLoadLevel, load: f64) -> f64 {
    match level {
        TrainingLoadLevel::Building => 90.0,
        TrainingLoadLevel::Peak => 85.0,
        TrainingLoadLevel::Maintaining => 75.0,
        TrainingLoadLevel::Detraining => lerp(load, 0.0, DETRAINING_CEILING_LOAD, 20.0, 60.0),
        TrainingLoadLevel::Overreaching => {
            lerp(load, OVERREACHING_START_LOAD, OVERREACHING_FLOOR_LOAD, 60.0, 40.0)
        }
    }
}

/// Whether today's effort (or rest) suits the current load level
pub fn effort_score(level: TrainingLoadLevel, active_today: bool) -> f64 {
    match (active_today, level) {
        (true, TrainingLoadLevel::Detraining) => 90.0,
        (true, TrainingLoadLevel::Building) => 90.0,
        (true, TrainingLoadLevel::Maintaining) => 80.0,
        (true, TrainingLoadLevel::Peak) => 65.0,
        (true, TrainingLoadLevel::Overreaching) => 30.0,
        (false, TrainingLoadLevel::Overreaching) => 95.0,
        (false, TrainingLoadLevel::Peak) => 85.0,
        (false, TrainingLoadLevel::Maintaining) => 70.0,
        (false, TrainingLoadLevel::Building) => 60.0,
        (false, TrainingLoadLevel::Detraining) => 30.0,
    }
}

/// Rescale a consistency multiplier in [0.8, 1.1] onto [30, 95]
pub fn consistency_score(multiplier: f64) -> f64 {
    lerp(
        multiplier,
        MIN_CONSISTENCY_MULTIPLIER,
        MAX_CONSISTENCY_MULTIPLIER,
        30.0,
        95.0,
    )
}

/// Score the activity pillar for `date`.
///
/// Returns `None` when the user has no activity on or before `date`.
pub fn calculate_activity_pillar_score(
    date: NaiveDate,
    activities: &[Activity],
    model: &dyn TrainingLoadModel,
) -> Option<ActivityScoreResult> {
    let history: Vec<Activity> = activities
        .iter()
        .filter(|a| a.date <= date)
        .cloned()
        .collect();
    if history.is_empty() {
        return None;
    }

    let load = model.training_load(date, &history);
    let level = model.load_level(load.score);
    let multiplier = model.consistency_multiplier(&history, date);
    let active_today = history.iter().any(|a| a.date == date);

    let load_status_score = load_status_score(level, load.score);
    let effort_score = effort_score(level, active_today);
    let consistency_score = consistency_score(multiplier);

    let weighted = load_status_score * LOAD_STATUS_WEIGHT
        + effort_score * EFFORT_WEIGHT
        + consistency_score * CONSISTENCY_WEIGHT;

    Some(ActivityScoreResult {
        score: clamp_score(weighted),
        load_status_score,
        effort_score,
        consistency_score,
        level,
        training_load: load.score,
        active_today,
        days_since_activity: load.days_since_activity,
        consistency_multiplier: multiplier,
    })
}
