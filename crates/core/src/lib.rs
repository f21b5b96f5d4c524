//! goalboard core data models.
//!
//! Goals, the tasks, learning modules and habit records their progress is
//! derived from, and the board that owns them.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Goals and what they track
mod goal;
mod task;
mod skill;
mod habit;
mod board;

// Re-exports
pub use id::*;
pub use error::{GoalError, Result};

pub use goal::{Goal, GoalKind, GoalStatus, ProgressSource, MAX_DESCRIPTION_LEN, MAX_TAGS, MAX_TITLE_LEN};
pub use task::{Priority, Task};
pub use skill::SkillModule;
pub use habit::{CompletionRecord, HabitTracking};
pub use board::GoalBoard;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
