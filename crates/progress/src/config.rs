//! Status classification thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds used to classify progress as on-track, at-risk or off-track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Minimum progress for on-track when the goal has no timeline
    pub on_track_threshold: f64,
    /// Minimum progress for at-risk when the goal has no timeline
    pub at_risk_threshold: f64,
    /// Smallest (most negative) lag behind elapsed time still on-track
    pub on_track_lag: f64,
    /// Smallest lag behind elapsed time still at-risk
    pub at_risk_lag: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            on_track_threshold: 80.0,
            at_risk_threshold: 40.0,
            on_track_lag: -10.0,
            at_risk_lag: -30.0,
        }
    }
}

impl ProgressConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
