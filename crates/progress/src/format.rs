//! Human-readable progress summaries.

use goalboard_core::{Goal, GoalKind, Time};

use crate::calculator::calculate_progress;
use crate::streak::calculate_current_streak;

/// One-line summary such as `"3/4 tasks • 75%"` or `"5 day streak • 40%"`.
pub fn format_progress(goal: &Goal, now: Time) -> String {
    let percent = calculate_progress(goal, now).round() as i64;

    if goal.kind == GoalKind::Habit {
        if let Some(habit) = goal.habit() {
            let streak = calculate_current_streak(&habit.records, now.date_naive());
            return format!("{streak} day streak • {percent}%");
        }
    }

    let tasks = goal.tasks();
    if !tasks.is_empty() {
        let done = tasks.iter().filter(|t| t.completed).count();
        return format!("{done}/{} tasks • {percent}%", tasks.len());
    }

    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use goalboard_core::{CompletionRecord, HabitTracking, ProgressSource, Task};

    fn at(y: i32, m: u32, d: u32) -> Time {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn task_goals_show_counts() {
        let mut tasks: Vec<Task> = (0..4).map(|i| Task::new(format!("t{i}")).unwrap()).collect();
        for t in tasks.iter_mut().take(3) {
            t.set_completed(true);
        }
        let g = Goal::new("u", "Release", GoalKind::Project)
            .unwrap()
            .with_source(ProgressSource::Tasks(tasks))
            .unwrap();
        assert_eq!(format_progress(&g, at(2025, 1, 1)), "3/4 tasks • 75%");
    }

    #[test]
    fn habit_goals_show_streak() {
        let habit = HabitTracking {
            target_frequency: Some(1.0),
            records: (1..=3)
                .map(|d| CompletionRecord::new(NaiveDate::from_ymd_opt(2025, 6, d).unwrap()))
                .collect(),
        };
        let g = Goal::new("u", "Stretch", GoalKind::Habit)
            .unwrap()
            .with_timeline(NaiveDate::from_ymd_opt(2025, 6, 1), None)
            .unwrap()
            .with_source(ProgressSource::Habit(habit))
            .unwrap();
        // two days elapsed at midnight on the 3rd, three records: capped at 100
        assert_eq!(format_progress(&g, at(2025, 6, 3)), "3 day streak • 100%");
        assert_eq!(format_progress(&g, at(2025, 6, 5)), "0 day streak • 75%");
    }

    #[test]
    fn health_goals_have_no_streak_line() {
        let g = Goal::new("u", "Sleep", GoalKind::Health)
            .unwrap()
            .with_source(ProgressSource::Habit(HabitTracking::default()))
            .unwrap();
        assert_eq!(format_progress(&g, at(2025, 6, 5)), "0%");
    }

    #[test]
    fn other_goals_show_the_percentage() {
        let g = Goal::new("u", "Save", GoalKind::Business)
            .unwrap()
            .with_manual_progress(12.6)
            .unwrap();
        assert_eq!(format_progress(&g, at(2025, 1, 1)), "13%");
    }
}
