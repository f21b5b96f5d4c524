//! Progress reports and board snapshots.

use goalboard_core::{Goal, GoalId, GoalKind, GoalStatus, Time};
use serde::Serialize;

use crate::calculator::{calculate_progress, calculate_weighted_task_progress};
use crate::config::ProgressConfig;
use crate::estimator::{calculate_required_daily_progress, estimate_completion_date};
use crate::format::format_progress;
use crate::status::{progress_status, ProgressColor, ProgressStatus};
use crate::streak::calculate_current_streak;

/// Everything derived about one goal at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Goal identifier
    pub goal_id: GoalId,
    /// Goal title
    pub title: String,
    /// Goal category
    pub kind: GoalKind,
    /// Lifecycle status of the goal
    pub goal_status: GoalStatus,
    /// Progress, 0-100
    pub progress: f64,
    /// Priority-weighted task progress, for goals with tasks
    pub weighted_progress: Option<f64>,
    /// Timeline classification
    pub status: ProgressStatus,
    /// Display color for `status`
    pub color: ProgressColor,
    /// One-line summary
    pub summary: String,
    /// Current streak, for habit goals
    pub streak: Option<u32>,
    /// Extrapolated completion time
    pub estimated_completion: Option<Time>,
    /// Percentage points per day needed to hit the target date
    pub required_daily_progress: f64,
    /// Instant the report was computed for
    pub evaluated_at: Time,
}

impl ProgressReport {
    /// Build a report for `goal` as of `now`.
    pub fn build(goal: &Goal, now: Time, config: &ProgressConfig) -> Self {
        let progress = calculate_progress(goal, now);
        let status = progress_status(progress, goal, now, config);
        let tasks = goal.tasks();
        let streak = match (goal.kind, goal.habit()) {
            (GoalKind::Habit, Some(habit)) => Some(calculate_current_streak(&habit.records, now.date_naive())),
            _ => None,
        };

        Self {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            kind: goal.kind,
            goal_status: goal.status,
            progress,
            weighted_progress: (!tasks.is_empty()).then(|| calculate_weighted_task_progress(tasks)),
            status,
            color: status.color(),
            summary: format_progress(goal, now),
            streak,
            estimated_completion: estimate_completion_date(goal, now),
            required_daily_progress: calculate_required_daily_progress(goal, now),
            evaluated_at: now,
        }
    }
}

/// Aggregate figures over a set of goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardSummary {
    /// Goals counted
    pub total_goals: usize,
    /// Goals with status active
    pub active: usize,
    /// Goals with status paused
    pub paused: usize,
    /// Goals with status completed
    pub completed: usize,
    /// Goals classified on-track
    pub on_track: usize,
    /// Goals classified at-risk
    pub at_risk: usize,
    /// Goals classified off-track
    pub off_track: usize,
    /// Mean progress, if there are any goals
    pub average_progress: Option<f64>,
}

impl BoardSummary {
    /// Summarize a set of reports.
    pub fn from_reports(reports: &[ProgressReport]) -> Self {
        let mut summary = BoardSummary {
            total_goals: reports.len(),
            ..Default::default()
        };
        for report in reports {
            match report.goal_status {
                GoalStatus::Active => summary.active += 1,
                GoalStatus::Paused => summary.paused += 1,
                GoalStatus::Completed => summary.completed += 1,
                GoalStatus::Archived => {}
            }
            match report.status {
                ProgressStatus::OnTrack => summary.on_track += 1,
                ProgressStatus::AtRisk => summary.at_risk += 1,
                ProgressStatus::OffTrack => summary.off_track += 1,
            }
        }
        if !reports.is_empty() {
            let total: f64 = reports.iter().map(|r| r.progress).sum();
            summary.average_progress = Some(total / reports.len() as f64);
        }
        summary
    }
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: Time,

    /// One report per non-archived goal
    pub reports: Vec<ProgressReport>,

    /// Aggregates over `reports`
    pub summary: BoardSummary,
}

impl ProgressSnapshot {
    /// Report on every non-archived goal as of `now`.
    pub fn take<'a, I>(goals: I, now: Time, config: &ProgressConfig) -> Self
    where
        I: IntoIterator<Item = &'a Goal>,
    {
        let reports: Vec<ProgressReport> = goals
            .into_iter()
            .filter(|g| !g.is_archived())
            .map(|g| ProgressReport::build(g, now, config))
            .collect();
        let summary = BoardSummary::from_reports(&reports);
        Self {
            timestamp: now,
            reports,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use goalboard_core::{ProgressSource, Task};

    fn now() -> Time {
        Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()
    }

    fn manual(title: &str, progress: f64) -> Goal {
        Goal::new("u", title, GoalKind::Project)
            .unwrap()
            .with_manual_progress(progress)
            .unwrap()
    }

    #[test]
    fn report_collects_derived_values() {
        let mut done = Task::new("a").unwrap();
        done.set_completed(true);
        let g = Goal::new("u", "Release", GoalKind::Project)
            .unwrap()
            .with_timeline(NaiveDate::from_ymd_opt(2025, 1, 1), NaiveDate::from_ymd_opt(2025, 1, 11))
            .unwrap()
            .with_source(ProgressSource::Tasks(vec![done, Task::new("b").unwrap()]))
            .unwrap();

        let report = ProgressReport::build(&g, now(), &ProgressConfig::default());
        assert_eq!(report.progress, 50.0);
        assert_eq!(report.weighted_progress, Some(50.0));
        assert_eq!(report.status, ProgressStatus::OnTrack);
        assert_eq!(report.color, ProgressColor::Green);
        assert_eq!(report.summary, "1/2 tasks • 50%");
        assert_eq!(report.streak, None);
        // 50% in 5 days: 5 more days
        assert_eq!(report.estimated_completion, Some(now() + chrono::Duration::days(5)));
        assert_eq!(report.required_daily_progress, 10.0);
    }

    #[test]
    fn snapshot_skips_archived_goals() {
        let mut archived = manual("old", 10.0);
        archived.archive();
        let goals = vec![manual("a", 90.0), manual("b", 50.0), manual("c", 10.0), archived];

        let snapshot = ProgressSnapshot::take(&goals, now(), &ProgressConfig::default());
        assert_eq!(snapshot.reports.len(), 3);
        assert_eq!(snapshot.timestamp, now());

        let s = &snapshot.summary;
        assert_eq!(s.total_goals, 3);
        assert_eq!(s.active, 3);
        assert_eq!((s.on_track, s.at_risk, s.off_track), (1, 1, 1));
        assert_eq!(s.average_progress, Some(50.0));
    }

    #[test]
    fn empty_snapshot_has_no_average() {
        let snapshot = ProgressSnapshot::take(&Vec::new(), now(), &ProgressConfig::default());
        assert_eq!(snapshot.summary, BoardSummary::default());
    }

    #[test]
    fn report_serializes_kebab_case_status() {
        let report = ProgressReport::build(&manual("a", 90.0), now(), &ProgressConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "on-track");
        assert_eq!(json["color"], "green");
        assert_eq!(json["kind"], "project");
    }
}
