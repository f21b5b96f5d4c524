//! Habit streaks.

use chrono::NaiveDate;
use goalboard_core::CompletionRecord;
use tracing::trace;

/// Consecutive days with a completion, ending today.
///
/// Walks back from `today` one day at a time. A gap stops the walk; extra
/// records for a day already counted (or dated after today) are skipped.
pub fn calculate_current_streak(records: &[CompletionRecord], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut expected = today;
    let mut streak = 0;
    for date in dates {
        if date == expected {
            streak += 1;
            trace!("Streak day {} on {}", streak, date);
            match expected.pred_opt() {
                Some(prev) => expected = prev,
                None => break,
            }
        } else if date < expected {
            trace!("Streak gap before {}", expected);
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn records(days: &[u32]) -> Vec<CompletionRecord> {
        days.iter().map(|d| CompletionRecord::new(day(*d))).collect()
    }

    #[test]
    fn counts_consecutive_days_ending_today() {
        assert_eq!(calculate_current_streak(&records(&[1, 2, 3]), day(3)), 3);
        assert_eq!(calculate_current_streak(&records(&[3, 1, 2]), day(3)), 3);
    }

    #[test]
    fn no_record_today_means_no_streak() {
        assert_eq!(calculate_current_streak(&records(&[1, 2, 3]), day(5)), 0);
        assert_eq!(calculate_current_streak(&records(&[1, 2, 3]), day(4)), 0);
        assert_eq!(calculate_current_streak(&[], day(4)), 0);
    }

    #[test]
    fn gap_stops_the_walk() {
        assert_eq!(calculate_current_streak(&records(&[1, 2, 4, 5]), day(5)), 2);
    }

    #[test]
    fn duplicates_and_future_records_are_skipped() {
        assert_eq!(calculate_current_streak(&records(&[2, 3, 3, 3]), day(3)), 2);
        assert_eq!(calculate_current_streak(&records(&[9, 2, 3]), day(3)), 2);
    }
}
