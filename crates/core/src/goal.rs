//! Goal model - a user-owned objective and the records its progress is derived from.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GoalError, Result};
use crate::habit::{check_frequency, CompletionRecord, HabitTracking};
use crate::id::{GoalId, ModuleId, RecordId, TaskId, UserId};
use crate::skill::{check_percentage, SkillModule};
use crate::task::{Priority, Task};
use crate::Time;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;
/// Most tags a goal may carry.
pub const MAX_TAGS: usize = 20;

/// A goal a user is working towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Owner
    pub user_id: UserId,

    /// Goal title
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: Option<String>,

    /// Lowercase tags
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// What sort of goal this is
    #[serde(rename = "type")]
    pub kind: GoalKind,

    /// Lifecycle status
    #[serde(default)]
    pub status: GoalStatus,

    /// Goal priority
    #[serde(default)]
    pub priority: Priority,

    /// When work started
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// When the goal should be reached
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    /// When the goal was marked completed
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,

    /// Records progress is derived from
    #[serde(default)]
    pub source: ProgressSource,

    /// User override of derived progress (0-100)
    #[serde(default)]
    pub manual_progress: Option<f64>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// Goal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    /// Deliverable with tasks
    Project,
    /// Skill built module by module
    Skill,
    /// Recurring behavior
    Habit,
    /// Single piece of work
    Task,
    /// Course of study
    Learning,
    /// Health or fitness target
    Health,
    /// Creative work
    Creative,
    /// Business objective
    Business,
}

impl GoalKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            GoalKind::Project => "project",
            GoalKind::Skill => "skill",
            GoalKind::Habit => "habit",
            GoalKind::Task => "task",
            GoalKind::Learning => "learning",
            GoalKind::Health => "health",
            GoalKind::Creative => "creative",
            GoalKind::Business => "business",
        }
    }

    /// Whether a goal of this kind may track progress with `source`.
    ///
    /// Task lists fit every kind; modules belong to skill and learning
    /// goals, completion records to habit and health goals.
    pub fn accepts(self, source: &ProgressSource) -> bool {
        match source {
            ProgressSource::None | ProgressSource::Tasks(_) => true,
            ProgressSource::Modules(_) => matches!(self, GoalKind::Skill | GoalKind::Learning),
            ProgressSource::Habit(_) => matches!(self, GoalKind::Habit | GoalKind::Health),
        }
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Being worked on
    #[default]
    Active,
    /// On hold
    Paused,
    /// Reached
    Completed,
    /// Soft-deleted
    Archived,
}

impl GoalStatus {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
            GoalStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The records a goal's progress is derived from. A goal has at most one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ProgressSource {
    /// Nothing tracked; progress comes from the timeline or the override
    #[default]
    None,
    /// Ordered task list
    Tasks(Vec<Task>),
    /// Ordered learning modules
    Modules(Vec<SkillModule>),
    /// Habit cadence and completion log
    Habit(HabitTracking),
}

impl ProgressSource {
    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ProgressSource::None => "nothing",
            ProgressSource::Tasks(_) => "tasks",
            ProgressSource::Modules(_) => "modules",
            ProgressSource::Habit(_) => "completion records",
        }
    }
}

impl Goal {
    /// Create an active goal.
    pub fn new(user_id: impl Into<UserId>, title: impl Into<String>, kind: GoalKind) -> Result<Self> {
        let title = title.into();
        check_title(&title)?;
        let now = Utc::now();
        Ok(Self {
            id: GoalId::new(),
            user_id: user_id.into(),
            title,
            description: None,
            tags: BTreeSet::new(),
            kind,
            status: GoalStatus::Active,
            priority: Priority::default(),
            start_date: None,
            target_date: None,
            completed_date: None,
            source: ProgressSource::None,
            manual_progress: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the timeline while building.
    pub fn with_timeline(mut self, start: Option<NaiveDate>, target: Option<NaiveDate>) -> Result<Self> {
        self.set_timeline(start, target)?;
        Ok(self)
    }

    /// Set the progress source while building.
    pub fn with_source(mut self, source: ProgressSource) -> Result<Self> {
        self.set_source(source)?;
        Ok(self)
    }

    /// Set the manual override while building.
    pub fn with_manual_progress(mut self, progress: f64) -> Result<Self> {
        self.set_manual_progress(Some(progress))?;
        Ok(self)
    }

    // === Accessors ===

    /// Tasks, or an empty slice when the goal does not track tasks.
    pub fn tasks(&self) -> &[Task] {
        match &self.source {
            ProgressSource::Tasks(tasks) => tasks,
            _ => &[],
        }
    }

    /// Modules, or an empty slice when the goal does not track modules.
    pub fn modules(&self) -> &[SkillModule] {
        match &self.source {
            ProgressSource::Modules(modules) => modules,
            _ => &[],
        }
    }

    /// Habit tracking, if the goal tracks completions.
    pub fn habit(&self) -> Option<&HabitTracking> {
        match &self.source {
            ProgressSource::Habit(habit) => Some(habit),
            _ => None,
        }
    }

    /// Completion records, or an empty slice.
    pub fn completion_records(&self) -> &[CompletionRecord] {
        self.habit().map_or(&[][..], |h| h.records.as_slice())
    }

    /// Whether the goal is archived.
    pub fn is_archived(&self) -> bool {
        self.status == GoalStatus::Archived
    }

    // === Field edits ===

    /// Change the title.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        check_title(&title)?;
        self.title = title;
        self.touch();
        Ok(())
    }

    /// Change or clear the description.
    pub fn set_description(&mut self, description: Option<String>) -> Result<()> {
        if let Some(d) = &description {
            check_description(d)?;
        }
        self.description = description;
        self.touch();
        Ok(())
    }

    /// Replace the tags. Tags are trimmed and lowercased; duplicates collapse.
    pub fn set_tags<I, S>(&mut self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags)?;
        self.touch();
        Ok(())
    }

    /// Change the priority.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.touch();
    }

    /// Change the timeline. A target must come strictly after the start.
    pub fn set_timeline(&mut self, start: Option<NaiveDate>, target: Option<NaiveDate>) -> Result<()> {
        check_timeline(start, target)?;
        self.start_date = start;
        self.target_date = target;
        self.touch();
        Ok(())
    }

    /// Change the status.
    ///
    /// Completing stamps `completed_date` with today; reopening (active or
    /// paused) clears it. Archiving keeps whatever date is there.
    pub fn set_status(&mut self, status: GoalStatus) {
        match status {
            GoalStatus::Completed if self.status != GoalStatus::Completed => {
                self.completed_date = Some(Utc::now().date_naive());
            }
            GoalStatus::Active | GoalStatus::Paused => self.completed_date = None,
            _ => {}
        }
        self.status = status;
        self.touch();
    }

    /// Soft delete.
    pub fn archive(&mut self) {
        self.set_status(GoalStatus::Archived);
    }

    /// Set or clear the manual progress override.
    pub fn set_manual_progress(&mut self, progress: Option<f64>) -> Result<()> {
        if let Some(p) = progress {
            check_percentage(p)?;
        }
        self.manual_progress = progress;
        self.touch();
        Ok(())
    }

    /// Replace the progress source wholesale.
    pub fn set_source(&mut self, source: ProgressSource) -> Result<()> {
        self.check_source(&source)?;
        self.source = source;
        self.touch();
        Ok(())
    }

    // === Tasks ===

    /// Append a task. A goal tracking nothing starts tracking tasks.
    pub fn add_task(&mut self, task: Task) -> Result<TaskId> {
        task.validate()?;
        if self.source == ProgressSource::None {
            self.source = ProgressSource::Tasks(Vec::new());
        }
        match &mut self.source {
            ProgressSource::Tasks(tasks) => {
                let id = task.id.clone();
                tasks.push(task);
                self.touch();
                Ok(id)
            }
            other => Err(GoalError::SourceAlreadySet {
                existing: other.name(),
                requested: "tasks",
            }),
        }
    }

    /// Mark a task done or not done.
    pub fn set_task_completed(&mut self, id: &TaskId, completed: bool) -> Result<()> {
        self.task_mut(id)?.set_completed(completed);
        self.touch();
        Ok(())
    }

    /// Remove a task, returning it.
    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let ProgressSource::Tasks(tasks) = &mut self.source else {
            return Err(GoalError::TaskNotFound(id.clone()));
        };
        let pos = tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| GoalError::TaskNotFound(id.clone()))?;
        let task = tasks.remove(pos);
        self.touch();
        Ok(task)
    }

    /// Mutable access to a task.
    pub fn task_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        let found = match &mut self.source {
            ProgressSource::Tasks(tasks) => tasks.iter_mut().find(|t| &t.id == id),
            _ => None,
        };
        found.ok_or_else(|| GoalError::TaskNotFound(id.clone()))
    }

    // === Modules ===

    /// Append a learning module.
    pub fn add_module(&mut self, module: SkillModule) -> Result<ModuleId> {
        module.validate()?;
        if self.source == ProgressSource::None {
            self.check_source(&ProgressSource::Modules(Vec::new()))?;
            self.source = ProgressSource::Modules(Vec::new());
        }
        match &mut self.source {
            ProgressSource::Modules(modules) => {
                let id = module.id.clone();
                modules.push(module);
                self.touch();
                Ok(id)
            }
            other => Err(GoalError::SourceAlreadySet {
                existing: other.name(),
                requested: "modules",
            }),
        }
    }

    /// Mark a module done or not done.
    pub fn set_module_completed(&mut self, id: &ModuleId, completed: bool) -> Result<()> {
        self.module_mut(id)?.completed = completed;
        self.touch();
        Ok(())
    }

    /// Update in-module progress.
    pub fn set_module_progress(&mut self, id: &ModuleId, progress: f64) -> Result<()> {
        self.module_mut(id)?.set_progress(progress)?;
        self.touch();
        Ok(())
    }

    fn module_mut(&mut self, id: &ModuleId) -> Result<&mut SkillModule> {
        let found = match &mut self.source {
            ProgressSource::Modules(modules) => modules.iter_mut().find(|m| &m.id == id),
            _ => None,
        };
        found.ok_or_else(|| GoalError::ModuleNotFound(id.clone()))
    }

    // === Habits ===

    /// Set the expected completions per day.
    pub fn set_target_frequency(&mut self, frequency: f64) -> Result<()> {
        check_frequency(frequency)?;
        self.habit_mut()?.target_frequency = Some(frequency);
        self.touch();
        Ok(())
    }

    /// Log a completion. Same-day records are all kept.
    pub fn log_completion(&mut self, record: CompletionRecord) -> Result<RecordId> {
        record.validate()?;
        let id = record.id.clone();
        self.habit_mut()?.records.push(record);
        self.touch();
        Ok(id)
    }

    /// Remove a completion record, returning it.
    pub fn remove_record(&mut self, id: &RecordId) -> Result<CompletionRecord> {
        let not_found = || GoalError::RecordNotFound(id.clone());
        let ProgressSource::Habit(habit) = &mut self.source else {
            return Err(not_found());
        };
        let pos = habit.records.iter().position(|r| &r.id == id).ok_or_else(not_found)?;
        let record = habit.records.remove(pos);
        self.touch();
        Ok(record)
    }

    fn habit_mut(&mut self) -> Result<&mut HabitTracking> {
        if self.source == ProgressSource::None {
            self.check_source(&ProgressSource::Habit(HabitTracking::default()))?;
            self.source = ProgressSource::Habit(HabitTracking::default());
        }
        match &mut self.source {
            ProgressSource::Habit(habit) => Ok(habit),
            other => Err(GoalError::SourceAlreadySet {
                existing: other.name(),
                requested: "completion records",
            }),
        }
    }

    // === Validation ===

    /// Check every invariant. Used on records that did not go through the
    /// mutation methods, e.g. after deserialization.
    pub fn validate(&self) -> Result<()> {
        check_title(&self.title)?;
        if let Some(d) = &self.description {
            check_description(d)?;
        }
        if self.tags.len() > MAX_TAGS {
            return Err(GoalError::TooManyTags {
                count: self.tags.len(),
                max: MAX_TAGS,
            });
        }
        if let Some(bad) = self.tags.iter().find(|t| t.is_empty() || **t != t.trim().to_lowercase()) {
            return Err(GoalError::InvalidTag(bad.clone()));
        }
        check_timeline(self.start_date, self.target_date)?;
        if let Some(p) = self.manual_progress {
            check_percentage(p)?;
        }
        self.check_source(&self.source)?;
        match &self.source {
            ProgressSource::None => Ok(()),
            ProgressSource::Tasks(tasks) => tasks.iter().try_for_each(Task::validate),
            ProgressSource::Modules(modules) => modules.iter().try_for_each(SkillModule::validate),
            ProgressSource::Habit(habit) => habit.validate(),
        }
    }

    fn check_source(&self, source: &ProgressSource) -> Result<()> {
        if self.kind.accepts(source) {
            Ok(())
        } else {
            Err(GoalError::IncompatibleSource {
                kind: self.kind,
                source_name: source.name(),
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn check_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(GoalError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(GoalError::TitleTooLong { len, max: MAX_TITLE_LEN });
    }
    Ok(())
}

fn check_description(description: &str) -> Result<()> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(GoalError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

fn check_timeline(start: Option<NaiveDate>, target: Option<NaiveDate>) -> Result<()> {
    match (start, target) {
        (Some(start), Some(target)) if target <= start => Err(GoalError::InvalidTimeline { start, target }),
        _ => Ok(()),
    }
}

fn normalize_tags<I, S>(tags: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeSet::new();
    for tag in tags {
        let raw = tag.as_ref();
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(GoalError::InvalidTag(raw.to_string()));
        }
        out.insert(normalized);
    }
    if out.len() > MAX_TAGS {
        return Err(GoalError::TooManyTags {
            count: out.len(),
            max: MAX_TAGS,
        });
    }
    Ok(out)
}
