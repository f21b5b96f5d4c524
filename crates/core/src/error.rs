//! Validation errors for goal records.

use chrono::NaiveDate;

use crate::goal::GoalKind;
use crate::id::{GoalId, ModuleId, RecordId, TaskId};

/// Result type for goal operations.
pub type Result<T> = std::result::Result<T, GoalError>;

/// Errors raised when a goal mutation would break an invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalError {
    /// Title is empty or whitespace
    #[error("title must not be empty")]
    EmptyTitle,

    /// Title exceeds the length limit
    #[error("title is {len} characters, limit is {max}")]
    TitleTooLong {
        /// Characters given
        len: usize,
        /// Limit
        max: usize,
    },

    /// Description exceeds the length limit
    #[error("description is {len} characters, limit is {max}")]
    DescriptionTooLong {
        /// Characters given
        len: usize,
        /// Limit
        max: usize,
    },

    /// More tags than allowed
    #[error("{count} tags given, limit is {max}")]
    TooManyTags {
        /// Tags given
        count: usize,
        /// Limit
        max: usize,
    },

    /// Tag is empty after normalization
    #[error("invalid tag: {0:?}")]
    InvalidTag(String),

    /// Target date does not come after the start date
    #[error("target date {target} must be after start date {start}")]
    InvalidTimeline {
        /// Start date
        start: NaiveDate,
        /// Target date
        target: NaiveDate,
    },

    /// Percentage outside 0..=100
    #[error("progress {0} is outside 0..=100")]
    InvalidProgress(f64),

    /// Negative or non-finite hour count
    #[error("hours must be a non-negative number, got {0}")]
    InvalidHours(f64),

    /// Habit quality rating outside 1..=5
    #[error("quality rating {0} is outside 1..=5")]
    InvalidQuality(u8),

    /// Habit frequency must be positive
    #[error("target frequency must be positive, got {0}")]
    InvalidFrequency(f64),

    /// Goal kind does not allow this progress source
    #[error("a {kind} goal cannot track progress with {source_name}")]
    IncompatibleSource {
        /// Kind of the goal
        kind: GoalKind,
        /// Rejected source
        source_name: &'static str,
    },

    /// The goal already tracks progress another way
    #[error("goal already tracks progress with {existing}, cannot add {requested}")]
    SourceAlreadySet {
        /// Source the goal has
        existing: &'static str,
        /// Source that was asked for
        requested: &'static str,
    },

    /// No task with this id on the goal
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// No module with this id on the goal
    #[error("module not found: {0}")]
    ModuleNotFound(ModuleId),

    /// No completion record with this id on the goal
    #[error("completion record not found: {0}")]
    RecordNotFound(RecordId),

    /// A goal with this id is already on the board
    #[error("duplicate goal id: {0}")]
    DuplicateGoal(GoalId),

    /// No goal with this id on the board
    #[error("goal not found: {0}")]
    GoalNotFound(GoalId),
}
