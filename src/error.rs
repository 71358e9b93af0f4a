//! Error types for Vitals Score
//!
//! Scoring itself never fails. These errors only surface at the JSON, FFI and
//! configuration boundaries.

use thiserror::Error;

/// Errors that can occur outside the pure scoring path
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),
}
