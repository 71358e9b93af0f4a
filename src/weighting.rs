//! Dynamic weighting
//!
//! Blends whichever pillars are present into one score. Base weights are
//! redistributed proportionally across present pillars, and the result is
//! pulled toward a neutral baseline as pillars go missing.

use crate::config::EngineConfig;
use crate::types::{DynamicWeights, EffectiveWeights, PillarValues};

/// Confidence by number of present pillars
pub fn confidence_factor(pillar_count: usize) -> f64 {
    match pillar_count {
        0 => 0.0,
        1 => 0.85,
        2 => 0.95,
        _ => 1.0,
    }
}

/// Weight present pillars and discount for missing ones
pub fn calculate_dynamic_weights(values: &PillarValues, config: &EngineConfig) -> DynamicWeights {
    let weights = &config.weights;
    let pillar_count = values.count();

    if pillar_count == 0 {
        return DynamicWeights {
            weighted_score: 0.0,
            confidence_factor: 0.0,
            effective_weights: EffectiveWeights::default(),
            pillar_count,
        };
    }

    let present_weight: f64 = [
        values.bp.map(|_| weights.bp),
        values.sleep.map(|_| weights.sleep),
        values.activity.map(|_| weights.activity),
    ]
    .into_iter()
    .flatten()
    .sum();

    let effective_weights = EffectiveWeights {
        bp: values.bp.map(|_| weights.bp / present_weight),
        sleep: values.sleep.map(|_| weights.sleep / present_weight),
        activity: values.activity.map(|_| weights.activity / present_weight),
    };

    let blended: f64 = [
        values.bp.zip(effective_weights.bp),
        values.sleep.zip(effective_weights.sleep),
        values.activity.zip(effective_weights.activity),
    ]
    .into_iter()
    .flatten()
    .map(|(score, weight)| score * weight)
    .sum();

    let confidence_factor = confidence_factor(pillar_count);
    let weighted_score =
        blended * confidence_factor + config.neutral_baseline * (1.0 - confidence_factor);

    DynamicWeights {
        weighted_score,
        confidence_factor,
        effective_weights,
        pillar_count,
    }
}
