//! The progress engine - derived progress values read against a clock.

use chrono::NaiveDate;
use goalboard_core::{CompletionRecord, Goal, SkillModule, Task, Time};

use crate::blocker::{analyze_dependencies, BlockerAnalysis};
use crate::calculator;
use crate::clock::{Clock, SystemClock};
use crate::config::ProgressConfig;
use crate::estimator;
use crate::format;
use crate::status::{self, ProgressColor, ProgressStatus};
use crate::streak;
use crate::tracker::{ProgressReport, ProgressSnapshot};

/// Derives progress, status and summaries for goals.
///
/// Stateless apart from its clock and thresholds; every call reads the
/// clock once and never touches the goal it is given.
#[derive(Debug, Clone, Default)]
pub struct ProgressEngine<C: Clock = SystemClock> {
    clock: C,
    config: ProgressConfig,
}

impl ProgressEngine<SystemClock> {
    /// Create an engine on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> ProgressEngine<C> {
    /// Create an engine on the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: ProgressConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ProgressConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// The engine's notion of now.
    pub fn now(&self) -> Time {
        self.clock.now()
    }

    /// Overall progress of a goal, 0-100.
    pub fn calculate_progress(&self, goal: &Goal) -> f64 {
        calculator::calculate_progress(goal, self.now())
    }

    /// Even-weight task completion share.
    pub fn calculate_task_progress(&self, tasks: &[Task]) -> f64 {
        calculator::calculate_task_progress(tasks)
    }

    /// Priority-weighted task completion share.
    pub fn calculate_weighted_task_progress(&self, tasks: &[Task]) -> f64 {
        calculator::calculate_weighted_task_progress(tasks)
    }

    /// Habit completion rate against its target frequency.
    pub fn calculate_habit_progress(&self, goal: &Goal) -> f64 {
        calculator::calculate_habit_progress(goal, self.now())
    }

    /// Completed module share.
    pub fn calculate_skill_progress(&self, modules: &[SkillModule]) -> f64 {
        calculator::calculate_skill_progress(modules)
    }

    /// Elapsed share of a date window.
    pub fn calculate_time_progress(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        calculator::calculate_time_progress(start, end, self.now())
    }

    /// Classify `progress` for `goal`.
    pub fn progress_status(&self, progress: f64, goal: &Goal) -> ProgressStatus {
        status::progress_status(progress, goal, self.now(), &self.config)
    }

    /// Color for a status; `None` (unknown) is gray.
    pub fn progress_color(&self, status: Option<ProgressStatus>) -> ProgressColor {
        status::progress_color(status)
    }

    /// Extrapolated completion time.
    pub fn estimate_completion_date(&self, goal: &Goal) -> Option<Time> {
        estimator::estimate_completion_date(goal, self.now())
    }

    /// Percentage points per day needed to hit the target date.
    pub fn calculate_required_daily_progress(&self, goal: &Goal) -> f64 {
        estimator::calculate_required_daily_progress(goal, self.now())
    }

    /// Consecutive completion days ending today (UTC).
    pub fn calculate_current_streak(&self, records: &[CompletionRecord]) -> u32 {
        streak::calculate_current_streak(records, self.now().date_naive())
    }

    /// One-line progress summary.
    pub fn format_progress(&self, goal: &Goal) -> String {
        format::format_progress(goal, self.now())
    }

    /// Dependency diagnostics for the goal's tasks.
    pub fn analyze_dependencies(&self, goal: &Goal) -> BlockerAnalysis {
        analyze_dependencies(goal.tasks())
    }

    /// Every derived value for one goal, from a single clock reading.
    pub fn report(&self, goal: &Goal) -> ProgressReport {
        ProgressReport::build(goal, self.now(), &self.config)
    }

    /// Reports and aggregates for all non-archived goals.
    pub fn snapshot<'a, I>(&self, goals: I) -> ProgressSnapshot
    where
        I: IntoIterator<Item = &'a Goal>,
    {
        ProgressSnapshot::take(goals, self.now(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use goalboard_core::{GoalBoard, GoalKind};

    fn engine() -> ProgressEngine<FixedClock> {
        ProgressEngine::with_clock(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()))
    }

    fn timed_goal() -> Goal {
        Goal::new("u", "Plan trip", GoalKind::Project)
            .unwrap()
            .with_timeline(NaiveDate::from_ymd_opt(2025, 1, 1), NaiveDate::from_ymd_opt(2025, 1, 11))
            .unwrap()
    }

    #[test]
    fn reads_the_injected_clock() {
        let e = engine();
        let g = timed_goal();
        assert_eq!(e.calculate_progress(&g), 50.0);
        assert_eq!(
            e.calculate_time_progress(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()),
            100.0
        );
        assert_eq!(e.format_progress(&g), "50%");
    }

    #[test]
    fn never_mutates_the_goal() {
        let e = engine();
        let g = timed_goal();
        let before = g.clone();
        let _ = e.report(&g);
        let _ = e.estimate_completion_date(&g);
        assert_eq!(g, before);
    }

    #[test]
    fn config_changes_thresholds() {
        let strict = engine().with_config(ProgressConfig {
            on_track_lag: 0.0,
            ..ProgressConfig::default()
        });
        let g = timed_goal();
        assert_eq!(strict.progress_status(45.0, &g), ProgressStatus::AtRisk);
        assert_eq!(engine().progress_status(45.0, &g), ProgressStatus::OnTrack);
    }

    #[test]
    fn snapshot_of_a_board() {
        let mut board = GoalBoard::new();
        board.insert(timed_goal()).unwrap();
        board.insert(timed_goal()).unwrap();
        let snapshot = engine().snapshot(board.iter());
        assert_eq!(snapshot.reports.len(), 2);
        assert_eq!(snapshot.summary.average_progress, Some(50.0));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressEngine>();
        assert_send_sync::<ProgressEngine<FixedClock>>();
    }
}
