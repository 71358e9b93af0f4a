//! Training-load models
//!
//! The activity pillar depends on a training-load model to classify how much
//! the user has been training. `TrainingLoadModel` is the seam; hosts with
//! their own load engine implement it, and `RollingLoadModel` is the default.

use crate::types::{Activity, TrainingLoad, TrainingLoadLevel};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Acute load window in days (inclusive of the scored day)
pub const ACUTE_WINDOW_DAYS: i64 = 7;

/// Consistency window in days (inclusive of the scored day)
pub const CONSISTENCY_WINDOW_DAYS: i64 = 28;

/// Active days in the consistency window that earn the full multiplier
const TARGET_ACTIVE_DAYS: f64 = 12.0;

/// Lowest multiplier reported by `consistency_multiplier`
pub const MIN_CONSISTENCY_MULTIPLIER: f64 = 0.8;

/// Highest multiplier reported by `consistency_multiplier`
pub const MAX_CONSISTENCY_MULTIPLIER: f64 = 1.1;

/// Strategy for training-load analysis, injected into the activity scorer
pub trait TrainingLoadModel: Send + Sync {
    /// Load score and recency for `date`
    fn training_load(&self, date: NaiveDate, activities: &[Activity]) -> TrainingLoad;

    /// Classify a load score
    fn load_level(&self, score: f64) -> TrainingLoadLevel;

    /// Multiplier in [0.8, 1.1] rewarding regular activity
    fn consistency_multiplier(&self, activities: &[Activity], date: NaiveDate) -> f64;
}

/// Default model: 7-day acute load of duration x intensity
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingLoadModel;

impl RollingLoadModel {
    fn activity_load(activity: &Activity) -> f64 {
        activity.duration_minutes as f64 * activity.intensity as f64 / 10.0
    }
}

impl TrainingLoadModel for RollingLoadModel {
    fn training_load(&self, date: NaiveDate, activities: &[Activity]) -> TrainingLoad {
        let score = activities
            .iter()
            .filter(|a| {
                let age = (date - a.date).num_days();
                (0..ACUTE_WINDOW_DAYS).contains(&age)
            })
            .map(Self::activity_load)
            .sum();

        let days_since_activity = activities
            .iter()
            .filter(|a| a.date <= date)
            .map(|a| (date - a.date).num_days())
            .min();

        TrainingLoad {
            score,
            days_since_activity,
        }
    }

    fn load_level(&self, score: f64) -> TrainingLoadLevel {
        if score < 15.0 {
            TrainingLoadLevel::Detraining
        } else if score < 40.0 {
            TrainingLoadLevel::Maintaining
        } else if score < 80.0 {
            TrainingLoadLevel::Building
        } else if score <= 120.0 {
            TrainingLoadLevel::Peak
        } else {
            TrainingLoadLevel::Overreaching
        }
    }

    fn consistency_multiplier(&self, activities: &[Activity], date: NaiveDate) -> f64 {
        let active_days: HashSet<NaiveDate> = activities
            .iter()
            .filter(|a| {
                let age = (date - a.date).num_days();
                (0..CONSISTENCY_WINDOW_DAYS).contains(&age)
            })
            .map(|a| a.date)
            .collect();

        let ratio = (active_days.len() as f64 / TARGET_ACTIVE_DAYS).min(1.0);
        MIN_CONSISTENCY_MULTIPLIER + (MAX_CONSISTENCY_MULTIPLIER - MIN_CONSISTENCY_MULTIPLIER) * ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn activity(d: u32, minutes: u32, intensity: u8) -> Activity {
        Activity {
            date: day(d),
            duration_minutes: minutes,
            intensity,
            activity_type: "run".to_string(),
        }
    }

    #[test]
    fn test_acute_window() {
        let activities = [
            activity(1, 60, 5), // 8 days before the 9th: outside
            activity(3, 40, 3), // 12
            activity(9, 30, 2), // 6
            activity(10, 90, 5), // after the scored day: ignored
        ];
        let load = RollingLoadModel.training_load(day(9), &activities);
        assert!((load.score - 18.0).abs() < 1e-9);
        assert_eq!(load.days_since_activity, Some(0));
    }

    #[test]
    fn test_days_since_activity() {
        let activities = [activity(2, 30, 2), activity(5, 30, 2)];
        let load = RollingLoadModel.training_load(day(12), &activities);
        assert_eq!(load.days_since_activity, Some(7));
        assert_eq!(load.score, 0.0);

        let none = RollingLoadModel.training_load(day(12), &[]);
        assert_eq!(none.days_since_activity, None);
    }

    #[test]
    fn test_levels() {
        let model = RollingLoadModel;
        assert_eq!(model.load_level(0.0), TrainingLoadLevel::Detraining);
        assert_eq!(model.load_level(20.0), TrainingLoadLevel::Maintaining);
        assert_eq!(model.load_level(60.0), TrainingLoadLevel::Building);
        assert_eq!(model.load_level(120.0), TrainingLoadLevel::Peak);
        assert_eq!(model.load_level(150.0), TrainingLoadLevel::Overreaching);
    }

    #[test]
    fn test_consistency_multiplier_range() {
        let model = RollingLoadModel;
        assert!((model.consistency_multiplier(&[], day(28)) - 0.8).abs() < 1e-9);

        let daily: Vec<Activity> = (1..=28).map(|d| activity(d, 30, 2)).collect();
        assert!((model.consistency_multiplier(&daily, day(28)) - 1.1).abs() < 1e-9);

        // Two sessions on the same day count once
        let six_days: Vec<Activity> = (1..=6)
            .flat_map(|d| [activity(d, 30, 2), activity(d, 20, 1)])
            .collect();
        assert!((model.consistency_multiplier(&six_days, day(28)) - 0.95).abs() < 1e-9);
    }
}
