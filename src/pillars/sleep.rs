//! Sleep pillar
//!
//! Population-threshold sleep scoring: duration (40%), restorative deep+REM
//! share (30%) and overnight heart metrics (30%), plus a consistency bonus or
//! penalty when several entries are scored together.

use crate::stats::{avg, clamp_score, lerp, standard_deviation};
use crate::types::{SleepEntry, SleepScoreResult, SleepScoreSource};

const DURATION_WEIGHT: f64 = 0.40;
const RESTORATIVE_WEIGHT: f64 = 0.30;
const HEART_WEIGHT: f64 = 0.30;

/// Score used when a sub-metric has no data
pub const NEUTRAL_SUB_SCORE: f64 = 70.0;

const DURATION_FLOOR: f64 = 25.0;

/// Minimum entries before duration consistency is judged
const MIN_ENTRIES_FOR_CONSISTENCY: usize = 3;

/// Duration sub-score: 100 for 7-9h, linear decay to 25 below 5h or above 11h
pub fn duration_score(minutes: f64) -> f64 {
    let hours = minutes / 60.0;
    if (7.0..=9.0).contains(&hours) {
        100.0
    } else if hours < 7.0 {
        lerp(hours, 5.0, 7.0, DURATION_FLOOR, 100.0)
    } else {
        lerp(hours, 9.0, 11.0, 100.0, DURATION_FLOOR)
    }
}

/// Restorative sub-score from deep + REM percentage
pub fn restorative_score(restorative_pct: Option<f64>) -> f64 {
    let Some(pct) = restorative_pct else {
        return NEUTRAL_SUB_SCORE;
    };
    if pct >= 45.0 {
        100.0
    } else if pct >= 40.0 {
        90.0
    } else if pct >= 35.0 {
        80.0
    } else if pct >= 30.0 {
        70.0
    } else if pct >= 25.0 {
        55.0
    } else if pct >= 20.0 {
        40.0
    } else {
        25.0
    }
}

/// Resting heart rate sub-score; lower is better
pub fn resting_hr_score(rhr: f64) -> f64 {
    if rhr < 50.0 {
        100.0
    } else if rhr < 55.0 {
        90.0
    } else if rhr < 60.0 {
        80.0
    } else if rhr < 65.0 {
        70.0
    } else if rhr < 70.0 {
        60.0
    } else {
        45.0
    }
}

/// HRV sub-score; higher is better
pub fn hrv_score(hrv: f64) -> f64 {
    if hrv >= 80.0 {
        100.0
    } else if hrv >= 65.0 {
        90.0
    } else if hrv >= 50.0 {
        80.0
    } else if hrv >= 40.0 {
        65.0
    } else {
        45.0
    }
}

/// Average of the RHR and HRV sub-scores that are available
pub fn heart_score(rhr: Option<f64>, hrv: Option<f64>) -> f64 {
    let parts: Vec<f64> = [rhr.map(resting_hr_score), hrv.map(hrv_score)]
        .into_iter()
        .flatten()
        .collect();
    avg(&parts).unwrap_or(NEUTRAL_SUB_SCORE)
}

fn consistency_bonus(durations: &[f64]) -> i8 {
    if durations.len() < MIN_ENTRIES_FOR_CONSISTENCY {
        return 0;
    }
    let sd = standard_deviation(durations);
    if sd < 30.0 {
        5
    } else if sd > 60.0 {
        -5
    } else {
        0
    }
}

/// Population-threshold sleep score; `None` when there are no entries
pub fn calculate_sleep_health_score(entries: &[SleepEntry]) -> Option<SleepScoreResult> {
    if entries.is_empty() {
        return None;
    }

    let durations: Vec<f64> = entries.iter().map(|e| e.duration_minutes as f64).collect();
    let restorative: Vec<f64> = entries.iter().filter_map(SleepEntry::restorative_pct).collect();
    let rhr: Vec<f64> = entries.iter().filter_map(|e| e.resting_hr).collect();
    let hrv: Vec<f64> = entries.iter().filter_map(SleepEntry::hrv).collect();

    let avg_duration_minutes = avg(&durations)?;
    let duration_score = duration_score(avg_duration_minutes);
    let restorative_score = restorative_score(avg(&restorative));
    let heart_score = heart_score(avg(&rhr), avg(&hrv));
    let consistency_bonus = consistency_bonus(&durations);

    let weighted = duration_score * DURATION_WEIGHT
        + restorative_score * RESTORATIVE_WEIGHT
        + heart_score * HEART_WEIGHT
        + consistency_bonus as f64;

    Some(SleepScoreResult {
        score: clamp_score(weighted),
        duration_score,
        restorative_score,
        heart_score,
        consistency_bonus,
        avg_duration_minutes,
        scorer: SleepScoreSource::Population,
    })
}
