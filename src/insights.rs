//! Insight generation
//!
//! Turns pillar results and cross-metric reasons into three short strings:
//! what is helping most, what is hurting most, and one thing to do next.

use crate::types::{
    ActivityScoreResult, BpScoreResult, CrossMetricResult, Insights, Pillar, PillarScore,
    SleepScoreResult, TrainingLoadLevel,
};

/// Pillar score at or above which nothing is flagged as a problem
const HEALTHY_SCORE: u8 = 80;

pub const NO_DATA_DRIVER: &str = "No health data available yet";
pub const NO_DATA_DETRACTOR: &str = "No health data available yet";
pub const NO_DATA_ACTION: &str =
    "Log a blood pressure reading, a night of sleep or an activity to get your first score";

/// Borrowed view of the pillar results for one day
#[derive(Debug, Clone, Copy, Default)]
pub struct PillarResults<'a> {
    pub bp: Option<&'a PillarScore<BpScoreResult>>,
    pub sleep: Option<&'a PillarScore<SleepScoreResult>>,
    pub activity: Option<&'a ActivityScoreResult>,
}

impl PillarResults<'_> {
    fn ranked(&self) -> Vec<(Pillar, u8)> {
        [
            self.bp.map(|r| (Pillar::BloodPressure, r.score())),
            self.sleep.map(|r| (Pillar::Sleep, r.score())),
            self.activity.map(|r| (Pillar::Activity, r.score)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Build driver, detractor and action item for the day
pub fn generate_insights(pillars: &PillarResults<'_>, cross_metric: &CrossMetricResult) -> Insights {
    let ranked = pillars.ranked();
    if ranked.is_empty() {
        return Insights {
            primary_driver: NO_DATA_DRIVER.to_string(),
            primary_detractor: NO_DATA_DETRACTOR.to_string(),
            action_item: NO_DATA_ACTION.to_string(),
        };
    }

    // Ties resolve to the earlier pillar in BP, Sleep, Activity order
    let mut best = ranked[0];
    let mut worst = ranked[0];
    for &(pillar, score) in &ranked[1..] {
        if score > best.1 {
            best = (pillar, score);
        }
        if score < worst.1 {
            worst = (pillar, score);
        }
    }

    let primary_driver = format!("{} is your strongest area ({}/100)", best.0.label(), best.1);

    // Any fired penalty rule outranks a low pillar. With the current rule
    // table a penalty always leaves the clamped total negative.
    let primary_detractor = match cross_metric.penalty_reasons.first() {
        Some(reason) => reason.clone(),
        None if worst.1 >= HEALTHY_SCORE => "No significant detractors today".to_string(),
        None => format!("{} needs attention ({}/100)", worst.0.label(), worst.1),
    };

    let action_item = if worst.1 >= HEALTHY_SCORE {
        "Keep up your current routine".to_string()
    } else {
        match worst.0 {
            Pillar::BloodPressure => pillars.bp.map(bp_action),
            Pillar::Sleep => pillars.sleep.map(sleep_action),
            Pillar::Activity => pillars.activity.map(activity_action),
        }
        .unwrap_or_else(|| "Keep logging your health data daily".to_string())
    };

    Insights {
        primary_driver,
        primary_detractor,
        action_item,
    }
}

fn projected_action(pillar: Pillar) -> String {
    format!(
        "{} today is estimated from recent history; log today's data for an accurate score",
        pillar.label()
    )
}

fn bp_action(result: &PillarScore<BpScoreResult>) -> String {
    let Some(bp) = result.measured() else {
        return projected_action(Pillar::BloodPressure);
    };

    if bp.variability_penalty >= 10 {
        "Your readings vary a lot; measure at the same time each day after 5 minutes of rest"
            .to_string()
    } else if bp.trend_modifier < 0 {
        "Your blood pressure is trending up; cut back on sodium and recheck over the next few days"
            .to_string()
    } else if bp.base_score < HEALTHY_SCORE as f64 {
        format!(
            "Blood pressure is in the {} range; aim for 30 minutes of moderate activity and limit sodium",
            bp.category
        )
    } else {
        "Keep measuring your blood pressure regularly".to_string()
    }
}

fn sleep_action(result: &PillarScore<SleepScoreResult>) -> String {
    let Some(sleep) = result.measured() else {
        return projected_action(Pillar::Sleep);
    };

    if sleep.consistency_bonus < 0 {
        return "Your sleep duration varies a lot; keep a consistent bedtime and wake time"
            .to_string();
    }

    let weakest = [
        ("duration", sleep.duration_score),
        ("restorative", sleep.restorative_score),
        ("heart", sleep.heart_score),
    ]
    .into_iter()
    .fold(("duration", f64::INFINITY), |acc, item| {
        if item.1 < acc.1 {
            item
        } else {
            acc
        }
    });

    match weakest.0 {
        "duration" if sleep.avg_duration_minutes > 540.0 => {
            "You are sleeping longer than needed; aim for 7 to 9 hours".to_string()
        }
        "duration" => "Aim for 7 to 9 hours of sleep; try going to bed 30 minutes earlier".to_string(),
        "restorative" => {
            "Deep and REM sleep are low; avoid alcohol and screens in the hour before bed".to_string()
        }
        _ => "Overnight heart metrics are strained; prioritize recovery and hydration today"
            .to_string(),
    }
}

fn activity_action(activity: &ActivityScoreResult) -> String {
    match activity.level {
        TrainingLoadLevel::Overreaching => {
            "Training load is very high; take a rest or light recovery day".to_string()
        }
        TrainingLoadLevel::Detraining => match activity.days_since_activity {
            Some(days) if days > 1 => format!(
                "It has been {days} days since your last activity; even a 20-minute walk helps"
            ),
            _ => "Activity has dropped off; build back up with short, easy sessions".to_string(),
        },
        _ if activity.consistency_score < activity.effort_score => {
            "Spread your activity across more days of the week".to_string()
        }
        _ => "Match today's effort to your training load; alternate hard and easy days".to_string(),
    }
}
