//! Blood pressure pillar
//!
//! Scores a day's readings with piecewise-linear curves for systolic and
//! diastolic pressure, then applies a variability penalty and a within-day
//! trend modifier.

use crate::stats::{avg, clamp_score, coefficient_of_variation, lerp};
use crate::types::{BpCategory, BpReading, BpScoreResult};

/// Systolic breakpoints as (mmHg, score); flat at the ends
const SYSTOLIC_CURVE: &[(f64, f64)] = &[
    (110.0, 100.0),
    (120.0, 95.0),
    (130.0, 80.0),
    (140.0, 65.0),
    (160.0, 45.0),
    (180.0, 20.0),
];

/// Diastolic breakpoints as (mmHg, score); flat at the ends
const DIASTOLIC_CURVE: &[(f64, f64)] = &[
    (70.0, 100.0),
    (80.0, 90.0),
    (90.0, 65.0),
    (100.0, 45.0),
    (110.0, 20.0),
];

/// Minimum readings before variability is meaningful
const MIN_READINGS_FOR_VARIABILITY: usize = 3;

/// Minimum readings before the two halves can be compared
const MIN_READINGS_FOR_TREND: usize = 4;

fn interpolate(curve: &[(f64, f64)], x: f64) -> f64 {
    let (first_x, first_y) = curve[0];
    if x <= first_x {
        return first_y;
    }
    for pair in curve.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x < x1 {
            return lerp(x, x0, x1, y0, y1);
        }
    }
    curve[curve.len() - 1].1
}

/// Systolic sub-score (non-increasing in systolic)
pub fn systolic_score(systolic: f64) -> f64 {
    interpolate(SYSTOLIC_CURVE, systolic)
}

/// Diastolic sub-score (non-increasing in diastolic)
pub fn diastolic_score(diastolic: f64) -> f64 {
    interpolate(DIASTOLIC_CURVE, diastolic)
}

/// Category from averaged, unrounded pressures
pub fn bp_category(systolic: f64, diastolic: f64) -> BpCategory {
    if systolic >= 140.0 || diastolic >= 90.0 {
        BpCategory::Stage2
    } else if systolic >= 130.0 || diastolic >= 80.0 {
        BpCategory::Stage1
    } else if systolic >= 120.0 {
        BpCategory::Elevated
    } else if systolic >= 115.0 || diastolic >= 75.0 {
        BpCategory::Normal
    } else {
        BpCategory::Optimal
    }
}

fn variability_penalty(systolic: &[f64], diastolic: &[f64]) -> u8 {
    if systolic.len() < MIN_READINGS_FOR_VARIABILITY {
        return 0;
    }
    let avg_cv = (coefficient_of_variation(systolic) + coefficient_of_variation(diastolic)) / 2.0;
    if avg_cv > 12.0 {
        15
    } else if avg_cv > 8.0 {
        10
    } else if avg_cv > 5.0 {
        5
    } else {
        0
    }
}

/// Compares the older half of the readings against the recent half.
/// A drop in pressure is an improvement.
fn trend_modifier(readings: &[BpReading]) -> i8 {
    if readings.len() < MIN_READINGS_FOR_TREND {
        return 0;
    }

    let mut sorted: Vec<&BpReading> = readings.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mid = sorted.len() / 2;
    let (older, recent) = sorted.split_at(mid);

    let half_mean = |half: &[&BpReading]| -> f64 {
        let sys: Vec<f64> = half.iter().map(|r| r.systolic as f64).collect();
        let dia: Vec<f64> = half.iter().map(|r| r.diastolic as f64).collect();
        (avg(&sys).unwrap_or(0.0) + avg(&dia).unwrap_or(0.0)) / 2.0
    };

    // Halves are compared on the (sys + dia) / 2 scale, not the sum: a 2 mmHg
    // drop in both pressures reaches the +5 band
    let improvement = half_mean(older) - half_mean(recent);
    if improvement >= 5.0 {
        10
    } else if improvement >= 2.0 {
        5
    } else if improvement <= -5.0 {
        -10
    } else if improvement <= -2.0 {
        -5
    } else {
        0
    }
}

/// Score a day's blood pressure readings; `None` when there are none
pub fn calculate_bp_score(readings: &[BpReading]) -> Option<BpScoreResult> {
    if readings.is_empty() {
        return None;
    }

    let systolic: Vec<f64> = readings.iter().map(|r| r.systolic as f64).collect();
    let diastolic: Vec<f64> = readings.iter().map(|r| r.diastolic as f64).collect();
    let pulses: Vec<f64> = readings
        .iter()
        .filter_map(|r| r.pulse.map(|p| p as f64))
        .collect();

    let avg_systolic = avg(&systolic)?;
    let avg_diastolic = avg(&diastolic)?;

    let base_score = systolic_score(avg_systolic).min(diastolic_score(avg_diastolic));
    let variability_penalty = variability_penalty(&systolic, &diastolic);
    let trend_modifier = trend_modifier(readings);

    let score = clamp_score(base_score - variability_penalty as f64 + trend_modifier as f64);

    Some(BpScoreResult {
        score,
        category: bp_category(avg_systolic, avg_diastolic),
        avg_systolic,
        avg_diastolic,
        avg_pulse: avg(&pulses),
        base_score,
        variability_penalty,
        trend_modifier,
        reading_count: readings.len(),
    })
}
