//! Task model - a completable unit of work under a goal.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GoalError, Result};
use crate::id::TaskId;
use crate::Time;

/// A unit of work belonging to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    #[serde(default)]
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Task priority, also its weight in weighted progress.
    /// Unrecognized values deserialize to `None`.
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,

    /// Due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Estimated effort in hours
    #[serde(default)]
    pub estimated_hours: Option<f64>,

    /// Hours actually spent
    #[serde(default)]
    pub actual_hours: Option<f64>,

    /// Tasks this one depends on. Never traversed by progress calculation.
    #[serde(default)]
    pub dependencies: BTreeSet<TaskId>,

    /// Free-form tags
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// When the task was last marked completed
    #[serde(default)]
    pub completed_at: Option<Time>,
}

/// Priority shared by goals and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Weight 1
    Low,
    /// Weight 2
    #[default]
    Medium,
    /// Weight 3
    High,
}

impl Priority {
    /// Weight used by weighted task progress.
    pub fn weight(self) -> u32 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Task {
    /// Create an open task.
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        Ok(Self {
            id: TaskId::new(),
            title,
            completed: false,
            priority: Some(Priority::default()),
            due_date: None,
            estimated_hours: None,
            actual_hours: None,
            dependencies: BTreeSet::new(),
            tags: BTreeSet::new(),
            completed_at: None,
        })
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set the estimated effort.
    pub fn with_estimate(mut self, hours: f64) -> Result<Self> {
        check_hours(hours)?;
        self.estimated_hours = Some(hours);
        Ok(self)
    }

    /// Add a dependency on another task.
    pub fn depends_on(mut self, task: TaskId) -> Self {
        self.dependencies.insert(task);
        self
    }

    /// Record hours actually spent.
    pub fn set_actual_hours(&mut self, hours: Option<f64>) -> Result<()> {
        if let Some(h) = hours {
            check_hours(h)?;
        }
        self.actual_hours = hours;
        Ok(())
    }

    /// Flip completion, stamping or clearing `completed_at`.
    pub fn set_completed(&mut self, completed: bool) {
        if completed && !self.completed {
            self.completed_at = Some(Utc::now());
        } else if !completed {
            self.completed_at = None;
        }
        self.completed = completed;
    }

    /// Weight in weighted progress; tasks without a priority weigh 1.
    pub fn weight(&self) -> u32 {
        self.priority.map_or(1, Priority::weight)
    }

    /// Check the task's own invariants.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        for hours in [self.estimated_hours, self.actual_hours].into_iter().flatten() {
            check_hours(hours)?;
        }
        Ok(())
    }
}

fn lenient_priority<'de, D>(deserializer: D) -> std::result::Result<Option<Priority>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

fn check_hours(hours: f64) -> Result<()> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(GoalError::InvalidHours(hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_open() {
        let task = Task::new("Write outline").unwrap();
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.priority, Some(Priority::Medium));
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(Task::new("   ").unwrap_err(), GoalError::EmptyTitle);
    }

    #[test]
    fn completion_stamps_and_clears_timestamp() {
        let mut task = Task::new("Ship").unwrap();
        task.set_completed(true);
        assert!(task.completed);
        let stamped = task.completed_at;
        assert!(stamped.is_some());

        // re-completing keeps the original stamp
        task.set_completed(true);
        assert_eq!(task.completed_at, stamped);

        task.set_completed(false);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn negative_hours_are_rejected() {
        let err = Task::new("Plan").unwrap().with_estimate(-1.0).unwrap_err();
        assert_eq!(err, GoalError::InvalidHours(-1.0));

        let mut task = Task::new("Plan").unwrap();
        assert!(task.set_actual_hours(Some(f64::NAN)).is_err());
        assert!(task.set_actual_hours(Some(2.5)).is_ok());
    }

    #[test]
    fn priority_weights() {
        assert_eq!(Priority::Low.weight(), 1);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::High.weight(), 3);
    }

    #[test]
    fn deserializes_with_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"t1","title":"Read","priority":"high"}"#).unwrap();
        assert_eq!(task.id.as_str(), "t1");
        assert_eq!(task.priority, Some(Priority::High));
        assert!(!task.completed);
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn unknown_priority_weighs_one() {
        let task: Task = serde_json::from_str(r#"{"title":"Read","priority":"urgent"}"#).unwrap();
        assert_eq!(task.priority, None);
        assert_eq!(task.weight(), 1);

        let task = Task::new("Read").unwrap().with_priority(Priority::High);
        assert_eq!(task.weight(), 3);
    }
}
