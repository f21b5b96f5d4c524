//! Progress percentage calculation.
//!
//! Every function here is pure: time-dependent rules take the instant to
//! evaluate at instead of reading a clock.

use chrono::{NaiveDate, NaiveTime};
use goalboard_core::{Goal, GoalKind, ProgressSource, SkillModule, Task, Time};
use tracing::{debug, warn};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Midnight UTC at the start of `date`.
pub(crate) fn midnight(date: NaiveDate) -> Time {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Fractional days from `from` to `to`; negative when `to` is earlier.
pub(crate) fn days_between(from: Time, to: Time) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Overall progress of a goal, 0-100.
///
/// The first matching rule wins:
/// 1. a manual override, clamped to 0-100
/// 2. a non-empty task list
/// 3. habit goals with completion tracking
/// 4. skill goals with learning modules
/// 5. elapsed share of the start-to-target timeline
/// 6. otherwise 0
pub fn calculate_progress(goal: &Goal, now: Time) -> f64 {
    if let Some(manual) = goal.manual_progress {
        if manual.is_finite() {
            debug!("Goal {}: manual progress {}", goal.id, manual);
            return manual.clamp(0.0, 100.0);
        }
        warn!("Goal {}: ignoring non-finite manual progress", goal.id);
    }

    let tasks = goal.tasks();
    if !tasks.is_empty() {
        debug!("Goal {}: progress from {} tasks", goal.id, tasks.len());
        return calculate_task_progress(tasks);
    }

    match (goal.kind, &goal.source) {
        (GoalKind::Habit, ProgressSource::Habit(_)) => {
            debug!("Goal {}: progress from habit completions", goal.id);
            return calculate_habit_progress(goal, now);
        }
        (GoalKind::Skill, ProgressSource::Modules(modules)) => {
            debug!("Goal {}: progress from {} modules", goal.id, modules.len());
            return calculate_skill_progress(modules);
        }
        _ => {}
    }

    if let (Some(start), Some(target)) = (goal.start_date, goal.target_date) {
        debug!("Goal {}: progress from elapsed time", goal.id);
        return calculate_time_progress(start, target, now);
    }

    debug!("Goal {}: nothing to derive progress from", goal.id);
    0.0
}

/// Share of completed tasks, every task weighing the same.
pub fn calculate_task_progress(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    (100.0 * completed as f64 / tasks.len() as f64).round()
}

/// Share of completed tasks weighted by priority (low 1, medium 2, high 3).
pub fn calculate_weighted_task_progress(tasks: &[Task]) -> f64 {
    let (completed, total) = tasks.iter().fold((0u64, 0u64), |(done, total), t| {
        let w = u64::from(t.weight());
        (if t.completed { done + w } else { done }, total + w)
    });
    if total == 0 {
        return 0.0;
    }
    (100.0 * completed as f64 / total as f64).round()
}

/// Completion rate of a habit against its target frequency since the start date.
///
/// Every record counts, including several on the same day.
pub fn calculate_habit_progress(goal: &Goal, now: Time) -> f64 {
    let Some(habit) = goal.habit() else {
        return 0.0;
    };
    let (Some(frequency), Some(start)) = (habit.target_frequency, goal.start_date) else {
        return 0.0;
    };

    let days_since_start = days_between(midnight(start), now).ceil();
    let expected = (days_since_start * frequency).floor();
    if expected.is_nan() || expected <= 0.0 {
        return 0.0;
    }

    let success_rate = (habit.records.len() as f64 / expected).min(1.0);
    (success_rate * 100.0).round()
}

/// Share of completed learning modules.
pub fn calculate_skill_progress(modules: &[SkillModule]) -> f64 {
    if modules.is_empty() {
        return 0.0;
    }
    let completed = modules.iter().filter(|m| m.completed).count();
    (100.0 * completed as f64 / modules.len() as f64).round()
}

/// Elapsed share of the `start`..`end` window at `now`, 0-100.
pub fn calculate_time_progress(start: NaiveDate, end: NaiveDate, now: Time) -> f64 {
    let start = midnight(start);
    let end = midnight(end);
    if now <= start {
        return 0.0;
    }
    if now >= end {
        return 100.0;
    }
    (100.0 * days_between(start, now) / days_between(start, end)).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use goalboard_core::{CompletionRecord, HabitTracking, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> Time {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn tasks(done: usize, open: usize) -> Vec<Task> {
        let mut out = Vec::new();
        for i in 0..done {
            let mut t = Task::new(format!("done {i}")).unwrap();
            t.set_completed(true);
            out.push(t);
        }
        for i in 0..open {
            out.push(Task::new(format!("open {i}")).unwrap());
        }
        out
    }

    #[test]
    fn task_progress_is_an_even_share() {
        assert_eq!(calculate_task_progress(&tasks(3, 1)), 75.0);
        assert_eq!(calculate_task_progress(&tasks(1, 2)), 33.0);
        assert_eq!(calculate_task_progress(&tasks(2, 1)), 67.0);
        assert_eq!(calculate_task_progress(&tasks(4, 0)), 100.0);
        assert_eq!(calculate_task_progress(&[]), 0.0);
    }

    #[test]
    fn weighted_progress_uses_priority() {
        let mut high = Task::new("high").unwrap().with_priority(Priority::High);
        high.set_completed(true);
        let low = Task::new("low").unwrap().with_priority(Priority::Low);
        // 3 of 4
        assert_eq!(calculate_weighted_task_progress(&[high.clone(), low.clone()]), 75.0);

        let mut unknown = low.clone();
        unknown.priority = None;
        unknown.set_completed(true);
        // 1 of (1 + 1)
        assert_eq!(calculate_weighted_task_progress(&[unknown, low]), 50.0);
        assert_eq!(calculate_weighted_task_progress(&[]), 0.0);
    }

    #[test]
    fn time_progress_boundaries() {
        let (s, e) = (date(2025, 1, 1), date(2025, 1, 11));
        assert_eq!(calculate_time_progress(s, e, at(2024, 12, 25)), 0.0);
        assert_eq!(calculate_time_progress(s, e, at(2025, 1, 1)), 0.0);
        assert_eq!(calculate_time_progress(s, e, at(2025, 1, 6)), 50.0);
        assert_eq!(calculate_time_progress(s, e, at(2025, 1, 11)), 100.0);
        assert_eq!(calculate_time_progress(s, e, at(2025, 3, 1)), 100.0);
    }

    #[test]
    fn time_progress_rounds_partial_days() {
        let (s, e) = (date(2025, 1, 1), date(2025, 1, 4));
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(calculate_time_progress(s, e, now), 33.0);
    }

    fn habit_goal(records: &[NaiveDate], frequency: Option<f64>) -> Goal {
        let habit = HabitTracking {
            target_frequency: frequency,
            records: records.iter().map(|d| CompletionRecord::new(*d)).collect(),
        };
        Goal::new("u", "Meditate", GoalKind::Habit)
            .unwrap()
            .with_timeline(Some(date(2025, 6, 1)), None)
            .unwrap()
            .with_source(ProgressSource::Habit(habit))
            .unwrap()
    }

    #[test]
    fn habit_progress_compares_against_expected_completions() {
        let g = habit_goal(&[date(2025, 6, 1), date(2025, 6, 2), date(2025, 6, 3)], Some(1.0));
        // ten days in, three completions
        assert_eq!(calculate_habit_progress(&g, at(2025, 6, 11)), 30.0);
        // 12:00 on the 3rd rounds up to three days
        let noon = Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap();
        assert_eq!(calculate_habit_progress(&g, noon), 100.0);
    }

    #[test]
    fn habit_progress_caps_at_full_and_counts_duplicates() {
        let d = date(2025, 6, 1);
        let g = habit_goal(&[d, d, d], Some(1.0));
        assert_eq!(calculate_habit_progress(&g, at(2025, 6, 3)), 100.0);

        let g = habit_goal(&[d, d], Some(1.0));
        assert_eq!(calculate_habit_progress(&g, at(2025, 6, 5)), 50.0);
    }

    #[test]
    fn habit_progress_needs_frequency_and_elapsed_time() {
        let g = habit_goal(&[date(2025, 6, 1)], None);
        assert_eq!(calculate_habit_progress(&g, at(2025, 6, 5)), 0.0);

        let g = habit_goal(&[date(2025, 6, 1)], Some(1.0));
        assert_eq!(calculate_habit_progress(&g, at(2025, 6, 1)), 0.0);
        assert_eq!(calculate_habit_progress(&g, at(2025, 5, 1)), 0.0);

        let mut g = habit_goal(&[date(2025, 6, 1)], Some(1.0));
        g.start_date = None;
        assert_eq!(calculate_habit_progress(&g, at(2025, 6, 5)), 0.0);
    }

    #[test]
    fn manual_override_wins_and_is_clamped() {
        let mut g = Goal::new("u", "Ship", GoalKind::Project)
            .unwrap()
            .with_source(ProgressSource::Tasks(tasks(10, 0)))
            .unwrap();
        g.manual_progress = Some(42.0);
        assert_eq!(calculate_progress(&g, at(2025, 1, 1)), 42.0);
        g.manual_progress = Some(140.0);
        assert_eq!(calculate_progress(&g, at(2025, 1, 1)), 100.0);
        g.manual_progress = Some(-5.0);
        assert_eq!(calculate_progress(&g, at(2025, 1, 1)), 0.0);
        g.manual_progress = Some(f64::NAN);
        assert_eq!(calculate_progress(&g, at(2025, 1, 1)), 100.0);
    }

    #[test]
    fn skill_modules_only_count_for_skill_goals() {
        let mut done = SkillModule::new("Borrowing").unwrap();
        done.completed = true;
        let open = SkillModule::new("Macros").unwrap();
        let modules = ProgressSource::Modules(vec![done, open]);

        let skill = Goal::new("u", "Rust", GoalKind::Skill)
            .unwrap()
            .with_source(modules.clone())
            .unwrap();
        assert_eq!(calculate_progress(&skill, at(2025, 1, 1)), 50.0);

        let learning = Goal::new("u", "Rust", GoalKind::Learning)
            .unwrap()
            .with_source(modules)
            .unwrap();
        assert_eq!(calculate_progress(&learning, at(2025, 1, 1)), 0.0);
    }

    #[test]
    fn timeline_is_the_fallback() {
        let g = Goal::new("u", "Novel", GoalKind::Creative)
            .unwrap()
            .with_timeline(Some(date(2025, 1, 1)), Some(date(2025, 1, 11)))
            .unwrap();
        assert_eq!(calculate_progress(&g, at(2025, 1, 6)), 50.0);

        let bare = Goal::new("u", "Novel", GoalKind::Creative).unwrap();
        assert_eq!(calculate_progress(&bare, at(2025, 1, 6)), 0.0);
    }

    #[test]
    fn empty_task_list_falls_through() {
        let g = Goal::new("u", "Launch", GoalKind::Business)
            .unwrap()
            .with_timeline(Some(date(2025, 1, 1)), Some(date(2025, 1, 11)))
            .unwrap()
            .with_source(ProgressSource::Tasks(vec![]))
            .unwrap();
        assert_eq!(calculate_progress(&g, at(2025, 1, 6)), 50.0);
    }
}
