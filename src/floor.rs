//! Critical floor
//!
//! Caps the overall score when any present pillar is dangerously low, so one
//! bad pillar cannot be averaged away by good ones.

use crate::stats::clamp_score;
use crate::types::PillarValues;

/// (pillar score below, overall cap) pairs, most severe first
const FLOOR_CAPS: &[(f64, u8)] = &[(30.0, 45), (40.0, 55)];

/// Cap for the lowest present pillar; `None` means no cap
pub fn critical_floor_cap(values: &PillarValues) -> Option<u8> {
    let lowest = values
        .present()
        .into_iter()
        .map(|(_, score)| score)
        .fold(None, |min: Option<f64>, s| Some(min.map_or(s, |m| m.min(s))))?;

    FLOOR_CAPS
        .iter()
        .find(|(threshold, _)| lowest < *threshold)
        .map(|(_, cap)| *cap)
}

/// Combine weighted score, adjustment and cap into the final 0-100 integer
pub fn finalize_score(weighted_score: f64, adjustment: i32, cap: Option<u8>) -> u8 {
    let adjusted = weighted_score + adjustment as f64;
    let capped = match cap {
        Some(cap) => adjusted.min(cap as f64),
        None => adjusted,
    };
    clamp_score(capped)
}
