/// Streak calculation for a single habit
///
/// A streak is the number of consecutive calendar days, ending today, on
/// which the habit is recorded as completed.

use chrono::NaiveDate;

use crate::domain::{HabitId, HistoryLog};

/// Computes per-habit streaks from the history log
pub struct StreakCalculator;

impl StreakCalculator {
    /// Count consecutive completed days walking backward from `today`
    ///
    /// The walk stops at the first day whose entry is `false` or missing,
    /// today included: a habit not yet done today has a streak of 0 even if
    /// yesterday was completed.
    pub fn compute(history: &HistoryLog, habit_id: &HabitId, today: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut checking_date = today;

        while history.is_completed(checking_date, habit_id) {
            streak += 1;
            match checking_date.pred_opt() {
                Some(previous) => checking_date = previous,
                None => break,
            }
        }

        streak
    }

    /// Get a motivational message for a streak length
    pub fn milestone_message(streak: u32) -> String {
        match streak {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", streak),
            30..=99 => format!("Incredible! {} days of consistency. You're a habit master!", streak),
            _ => format!("Legendary! {} days of unwavering commitment. You're an inspiration!", streak),
        }
    }
}
