//! Completion time estimation.

use chrono::Duration;
use goalboard_core::{Goal, Time};

use crate::calculator::{calculate_progress, days_between, midnight};

/// Linear extrapolation of when the goal will reach 100%.
///
/// Assumes progress keeps coming at its average daily rate since the start
/// date. Returns `now` for finished goals and `None` when there is no
/// progress or no start date to extrapolate from.
pub fn estimate_completion_date(goal: &Goal, now: Time) -> Option<Time> {
    let progress = calculate_progress(goal, now);
    if progress >= 100.0 {
        return Some(now);
    }
    let start = goal.start_date?;
    if progress <= 0.0 {
        return None;
    }

    let days_since_start = days_between(midnight(start), now).ceil();
    if days_since_start <= 0.0 {
        return None;
    }
    let daily_rate = progress / days_since_start;
    if daily_rate <= 0.0 {
        return None;
    }

    let remaining_days = ((100.0 - progress) / daily_rate).ceil();
    let remaining = Duration::try_days(remaining_days as i64)?;
    now.checked_add_signed(remaining)
}

/// Percentage points per day needed to finish by the target date.
///
/// 0 when already done or there is no target; 100 once the target day has
/// arrived with work left.
pub fn calculate_required_daily_progress(goal: &Goal, now: Time) -> f64 {
    let progress = calculate_progress(goal, now);
    if progress >= 100.0 {
        return 0.0;
    }
    let Some(target) = goal.target_date else {
        return 0.0;
    };

    let days_remaining = days_between(now, midnight(target)).ceil();
    if days_remaining <= 0.0 {
        return 100.0;
    }
    (100.0 - progress) / days_remaining
}
