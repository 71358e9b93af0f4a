//! Cross-metric adjustment
//!
//! A fixed rule table rewarding or penalizing relationships between pillars.
//! Rules only consider present pillars. The thresholds and deltas are
//! calibration constants; change them only with product sign-off.

use crate::types::{CrossMetricResult, PillarValues};
use tracing::trace;

/// Bounds for the summed adjustment
pub const MIN_ADJUSTMENT: i32 = -10;
pub const MAX_ADJUSTMENT: i32 = 7;

/// One interaction rule
pub struct CrossMetricRule {
    pub name: &'static str,
    pub delta: i32,
    pub reason: &'static str,
    applies: fn(&PillarValues) -> bool,
}

impl CrossMetricRule {
    pub fn applies(&self, values: &PillarValues) -> bool {
        (self.applies)(values)
    }
}

fn both(a: Option<f64>, b: Option<f64>, test: impl Fn(f64, f64) -> bool) -> bool {
    matches!((a, b), (Some(x), Some(y)) if test(x, y))
}

/// Rule table, evaluated in order
pub const RULES: &[CrossMetricRule] = &[
    CrossMetricRule {
        name: "poor_sleep_elevated_bp",
        delta: -5,
        reason: "Poor sleep is compounding elevated blood pressure",
        applies: |v| both(v.sleep, v.bp, |sleep, bp| sleep < 50.0 && bp < 50.0),
    },
    CrossMetricRule {
        name: "excellent_sleep_excellent_bp",
        delta: 3,
        reason: "Excellent sleep and blood pressure are reinforcing each other",
        applies: |v| both(v.sleep, v.bp, |sleep, bp| sleep >= 80.0 && bp >= 80.0),
    },
    CrossMetricRule {
        name: "high_activity_poor_sleep",
        delta: -3,
        reason: "High activity without enough sleep is limiting recovery",
        applies: |v| both(v.activity, v.sleep, |act, sleep| act >= 70.0 && sleep < 40.0),
    },
    CrossMetricRule {
        name: "good_activity_good_sleep",
        delta: 2,
        reason: "Regular activity and good sleep are supporting each other",
        applies: |v| both(v.activity, v.sleep, |act, sleep| act >= 75.0 && sleep >= 75.0),
    },
    CrossMetricRule {
        name: "good_activity_good_bp",
        delta: 2,
        reason: "Regular activity is supporting healthy blood pressure",
        applies: |v| both(v.activity, v.bp, |act, bp| act >= 70.0 && bp >= 75.0),
    },
    CrossMetricRule {
        name: "all_pillars_low",
        delta: -5,
        reason: "All health pillars are below target at the same time",
        applies: |v| match (v.bp, v.sleep, v.activity) {
            (Some(bp), Some(sleep), Some(act)) => bp < 45.0 && sleep < 45.0 && act < 45.0,
            _ => false,
        },
    },
];

/// Evaluate the rule table and clamp the total
pub fn calculate_cross_metric_adjustment(values: &PillarValues) -> CrossMetricResult {
    let mut total = 0;
    let mut reasons = Vec::new();
    let mut penalty_reasons = Vec::new();

    for rule in RULES.iter().filter(|rule| rule.applies(values)) {
        trace!(rule = rule.name, delta = rule.delta, "cross-metric rule triggered");
        total += rule.delta;
        reasons.push(rule.reason.to_string());
        if rule.delta < 0 {
            penalty_reasons.push(rule.reason.to_string());
        }
    }

    CrossMetricResult {
        adjustment: total.clamp(MIN_ADJUSTMENT, MAX_ADJUSTMENT),
        reasons,
        penalty_reasons,
    }
}
