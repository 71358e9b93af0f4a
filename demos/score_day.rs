//! Score a sample week of data and print the result for the last day

use chrono::NaiveDate;
use vitals_score::{calculate_health_score, Activity, BpReading, SleepEntry};

fn main() {
    let Some(start) = NaiveDate::from_ymd_opt(2024, 5, 1) else {
        return;
    };
    let days: Vec<NaiveDate> = start.iter_days().take(7).collect();

    let bp_readings: Vec<BpReading> = days
        .iter()
        .enumerate()
        .map(|(i, &date)| BpReading {
            date,
            systolic: 128 - i as u32,
            diastolic: 82 - i as u32 / 2,
            pulse: Some(66),
        })
        .collect();

    // No sleep logged on the last night; the engine projects it
    let sleep_entries: Vec<SleepEntry> = days[..6]
        .iter()
        .map(|&date| SleepEntry {
            date,
            duration_minutes: 430,
            deep_sleep_pct: Some(18.0),
            rem_sleep_pct: Some(21.0),
            resting_hr: Some(58.0),
            hrv_low: Some(40.0),
            hrv_high: Some(60.0),
        })
        .collect();

    let activities: Vec<Activity> = days
        .iter()
        .step_by(2)
        .map(|&date| Activity {
            date,
            duration_minutes: 35,
            intensity: 3,
            activity_type: "walk".to_string(),
        })
        .collect();

    let result = calculate_health_score(&bp_readings, &sleep_entries, &activities, days[6]);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}
