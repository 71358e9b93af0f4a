//! Vitals Score - Deterministic composite daily health score
//!
//! Vitals Score turns a user's blood pressure readings, sleep entries and
//! activities into one 0-100 score for a day, through a pure pipeline:
//! pillar scoring → projection of missing pillars → dynamic weighting →
//! cross-metric adjustment → critical floor → insights.
//!
//! ## Modules
//!
//! - **Pillars**: Blood pressure, sleep and activity scorers
//! - **Collaborators**: Training-load model and personalized sleep scorer traits
//! - **Composite**: Projection, weighting, cross-metric rules, floor and insights

pub mod baseline;
pub mod config;
pub mod cross_metric;
pub mod error;
pub mod floor;
pub mod insights;
pub mod pillars;
pub mod pipeline;
pub mod projector;
pub mod stats;
pub mod training_load;
pub mod types;
pub mod weighting;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use baseline::{BaselineSleepScorer, PersonalizedSleepScore, PersonalizedSleepScorer};
pub use config::EngineConfig;
pub use error::ComputeError;
pub use pillars::{calculate_activity_pillar_score, calculate_bp_score, calculate_sleep_health_score};
pub use pipeline::{
    calculate_health_score, calculate_health_score_today, health_score_json,
    health_score_range_json, HealthScoreEngine, ScoreRequest,
};
pub use training_load::{RollingLoadModel, TrainingLoadModel};
pub use types::{Activity, BpReading, HealthScoreResult, PillarScore, SleepEntry};

/// Library version
pub const VITALS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "vitals-score";
