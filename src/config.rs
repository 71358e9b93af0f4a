//! Engine configuration
//!
//! Tunable inputs to the health-score engine. Scoring curves, cross-metric
//! rules and floor caps are calibration constants and live next to the code
//! that uses them rather than here.

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};

/// Base pillar weights, redistributed when pillars are missing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    pub bp: f64,
    pub sleep: f64,
    pub activity: f64,
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            bp: 0.30,
            sleep: 0.35,
            activity: 0.35,
        }
    }
}

/// Score projection settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Trailing window (days before the target) searched for history
    pub window_days: i64,
    /// Minimum scored days inside the window
    pub min_points: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            min_points: 3,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: PillarWeights,
    /// Score the weighted result is pulled toward as pillars go missing
    pub neutral_baseline: f64,
    pub projection: ProjectionConfig,
    /// Nights of history before a personalized sleep score is trusted
    pub min_personalized_sleep_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: PillarWeights::default(),
            neutral_baseline: 65.0,
            projection: ProjectionConfig::default(),
            min_personalized_sleep_history: 3,
        }
    }
}

impl EngineConfig {
    /// Check that the configuration can produce meaningful scores
    pub fn validate(&self) -> Result<(), ComputeError> {
        let weights = [
            ("bp", self.weights.bp),
            ("sleep", self.weights.sleep),
            ("activity", self.weights.activity),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ComputeError::InvalidConfig(format!(
                    "weight for {name} must be positive, got {weight}"
                )));
            }
        }

        if !(0.0..=100.0).contains(&self.neutral_baseline) {
            return Err(ComputeError::InvalidConfig(format!(
                "neutral_baseline must be within 0-100, got {}",
                self.neutral_baseline
            )));
        }

        if self.projection.window_days < 1 {
            return Err(ComputeError::InvalidConfig(
                "projection.window_days must be at least 1".to_string(),
            ));
        }

        if self.projection.min_points < 2 {
            return Err(ComputeError::InvalidConfig(
                "projection.min_points must be at least 2".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ComputeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.bp + config.weights.sleep + config.weights.activity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{"neutral_baseline": 60.0}"#).unwrap();
        assert_eq!(config.neutral_baseline, 60.0);
        assert_eq!(config.projection.window_days, 30);
        assert_eq!(config.weights, PillarWeights::default());
    }

    #[test]
    fn test_rejects_bad_weights() {
        let json = r#"{"weights": {"bp": 0.0, "sleep": 0.5, "activity": 0.5}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ComputeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_projection() {
        let mut config = EngineConfig::default();
        config.projection.min_points = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let loaded = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ComputeError::JsonError(_))
        ));
    }
}
