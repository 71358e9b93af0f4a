//! Pillar scorers
//!
//! Each scorer turns one signal type into a 0-100 sub-score plus the
//! explanatory fields the insight generator reads.

pub mod activity;
pub mod bp;
pub mod sleep;

pub use activity::calculate_activity_pillar_score;
pub use bp::calculate_bp_score;
pub use sleep::calculate_sleep_health_score;
