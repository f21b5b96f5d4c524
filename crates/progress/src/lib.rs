//! Progress Tracking
//!
//! Goal progress percentages, timeline status, habit streaks, completion
//! estimates and dependency diagnostics.

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod calculator;
pub mod status;
pub mod estimator;
pub mod streak;
pub mod format;
pub mod tracker;
pub mod blocker;
pub mod engine;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ProgressConfig;
pub use calculator::{
    calculate_habit_progress, calculate_progress, calculate_skill_progress, calculate_task_progress,
    calculate_time_progress, calculate_weighted_task_progress,
};
pub use status::{progress_color, progress_status, ProgressColor, ProgressStatus};
pub use estimator::{calculate_required_daily_progress, estimate_completion_date};
pub use streak::calculate_current_streak;
pub use format::format_progress;
pub use tracker::{BoardSummary, ProgressReport, ProgressSnapshot};
pub use blocker::{analyze_dependencies, BlockedTask, BlockerAnalysis, MissingDependency};
pub use engine::ProgressEngine;
