//! On-track / at-risk / off-track classification.

use goalboard_core::{Goal, Time};
use serde::{Deserialize, Serialize};

use crate::calculator::calculate_time_progress;
use crate::config::ProgressConfig;

/// How a goal is doing relative to its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    /// Not meaningfully behind
    OnTrack,
    /// Falling behind
    AtRisk,
    /// Well behind
    OffTrack,
}

impl ProgressStatus {
    /// Kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::OnTrack => "on-track",
            ProgressStatus::AtRisk => "at-risk",
            ProgressStatus::OffTrack => "off-track",
        }
    }

    /// Display color for this status.
    pub fn color(self) -> ProgressColor {
        progress_color(Some(self))
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-track" => Ok(ProgressStatus::OnTrack),
            "at-risk" => Ok(ProgressStatus::AtRisk),
            "off-track" => Ok(ProgressStatus::OffTrack),
            other => Err(format!("unknown progress status: {other}")),
        }
    }
}

/// Color token handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressColor {
    /// On track
    Green,
    /// At risk
    Orange,
    /// Off track
    Red,
    /// Unknown status
    Gray,
}

impl ProgressColor {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressColor::Green => "green",
            ProgressColor::Orange => "orange",
            ProgressColor::Red => "red",
            ProgressColor::Gray => "gray",
        }
    }
}

impl std::fmt::Display for ProgressColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color for a status; an unknown status is gray.
pub fn progress_color(status: Option<ProgressStatus>) -> ProgressColor {
    match status {
        Some(ProgressStatus::OnTrack) => ProgressColor::Green,
        Some(ProgressStatus::AtRisk) => ProgressColor::Orange,
        Some(ProgressStatus::OffTrack) => ProgressColor::Red,
        None => ProgressColor::Gray,
    }
}

/// Classify `progress` for `goal` at `now`.
///
/// Goals without both a start and a target date are judged on progress
/// alone. Otherwise progress is compared with the elapsed share of the
/// timeline.
pub fn progress_status(progress: f64, goal: &Goal, now: Time, config: &ProgressConfig) -> ProgressStatus {
    let (Some(start), Some(target)) = (goal.start_date, goal.target_date) else {
        return if progress >= config.on_track_threshold {
            ProgressStatus::OnTrack
        } else if progress >= config.at_risk_threshold {
            ProgressStatus::AtRisk
        } else {
            ProgressStatus::OffTrack
        };
    };

    let diff = progress - calculate_time_progress(start, target, now);
    if diff >= config.on_track_lag {
        ProgressStatus::OnTrack
    } else if diff >= config.at_risk_lag {
        ProgressStatus::AtRisk
    } else {
        ProgressStatus::OffTrack
    }
}
