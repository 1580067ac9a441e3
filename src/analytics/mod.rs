/// Analytics engine for cross-habit statistics
///
/// Every figure here is a pure function of the habit collection, the history
/// log and the day the engine is evaluated for.

pub mod calendar;

pub use calendar::{CalendarDay, CompletionLevel};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{Category, Habit, HabitId, HistoryLog};

/// Completion progress for today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodayProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Completed versus possible habit-days since each habit's creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRate {
    pub completion_rate: u32,
    pub total_completed: usize,
}

/// Headline statistics shown together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: u32,
    pub total_completed: usize,
}

/// One day of the trailing week series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    pub date: NaiveDate,
    /// Short weekday name ("Sun" .. "Sat")
    pub day_label: &'static str,
    pub day_of_month: u32,
    pub percent: u32,
    pub completed: usize,
    pub total: usize,
}

/// Completion figures for a single habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    pub id: HabitId,
    pub name: String,
    pub category: Category,
    pub percent: u32,
    pub streak: u32,
}

/// Rounded percentage, 0 when there is nothing to divide by
pub(crate) fn percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Read-only statistics view over habits and history
pub struct StatsEngine<'a> {
    habits: &'a [Habit],
    history: &'a HistoryLog,
    today: NaiveDate,
}

impl<'a> StatsEngine<'a> {
    pub fn new(habits: &'a [Habit], history: &'a HistoryLog, today: NaiveDate) -> Self {
        Self { habits, history, today }
    }

    /// How many habits are done today out of all habits
    pub fn today_progress(&self) -> TodayProgress {
        let total = self.habits.len();
        let completed = self.completed_on(self.today, self.habits.iter());

        TodayProgress {
            completed,
            total,
            percent: percent(completed, total),
        }
    }

    /// Consecutive days, ending today, on which every current habit was completed
    ///
    /// With no habits this is 0 rather than an unbounded vacuous streak.
    pub fn current_all_streak(&self) -> u32 {
        if self.habits.is_empty() {
            return 0;
        }

        let mut streak = 0;
        let mut checking_date = self.today;

        while self.all_completed_on(checking_date) {
            streak += 1;
            match checking_date.pred_opt() {
                Some(previous) => checking_date = previous,
                None => break,
            }
        }

        streak
    }

    /// Longest run of consecutive *logged* days on which every habit was completed
    ///
    /// Only days present in the log are scanned, so two logged days separated
    /// by unlogged calendar days still count as adjacent.
    pub fn longest_all_streak(&self) -> u32 {
        if self.habits.is_empty() {
            return 0;
        }

        let mut longest = 0;
        let mut running = 0;

        for date in self.history.dates() {
            if self.all_completed_on(date) {
                running += 1;
                longest = longest.max(running);
            } else {
                running = 0;
            }
        }

        longest
    }

    /// Completion rate over every logged day and every habit that existed on it
    pub fn lifetime_completion_rate(&self) -> CompletionRate {
        let mut total_possible = 0;
        let mut total_completed = 0;

        for (date, record) in self.history.iter() {
            for habit in self.habits.iter().filter(|habit| habit.exists_on(date)) {
                total_possible += 1;
                if record.get(&habit.id).copied().unwrap_or(false) {
                    total_completed += 1;
                }
            }
        }

        CompletionRate {
            completion_rate: percent(total_completed, total_possible),
            total_completed,
        }
    }

    /// Streaks and completion rate together; all zero when there are no habits
    pub fn summary(&self) -> StatsSummary {
        if self.habits.is_empty() {
            return StatsSummary::default();
        }

        let rate = self.lifetime_completion_rate();
        StatsSummary {
            current_streak: self.current_all_streak(),
            longest_streak: self.longest_all_streak(),
            completion_rate: rate.completion_rate,
            total_completed: rate.total_completed,
        }
    }

    /// The last seven days, oldest first, ending today
    ///
    /// Each day's total only counts habits that already existed that day.
    pub fn week_series(&self) -> Vec<DayPoint> {
        (0..7)
            .rev()
            .filter_map(|offset| self.today.checked_sub_signed(Duration::days(offset)))
            .map(|date| {
                let active = self.habits.iter().filter(|habit| habit.exists_on(date));
                let total = active.clone().count();
                let completed = self.completed_on(date, active);

                DayPoint {
                    date,
                    day_label: short_weekday(date),
                    day_of_month: date.day(),
                    percent: percent(completed, total),
                    completed,
                    total,
                }
            })
            .collect()
    }

    /// Completion percentage per habit over logged days since its creation
    pub fn per_habit_stats(&self) -> Vec<HabitStats> {
        self.habits
            .iter()
            .map(|habit| {
                let mut total = 0;
                let mut completed = 0;

                for (date, record) in self.history.iter() {
                    if habit.exists_on(date) {
                        total += 1;
                        if record.get(&habit.id).copied().unwrap_or(false) {
                            completed += 1;
                        }
                    }
                }

                HabitStats {
                    id: habit.id.clone(),
                    name: habit.name.clone(),
                    category: habit.category,
                    percent: percent(completed, total),
                    streak: habit.streak,
                }
            })
            .collect()
    }

    fn completed_on<'h>(&self, date: NaiveDate, habits: impl Iterator<Item = &'h Habit>) -> usize {
        habits
            .filter(|habit| self.history.is_completed(date, &habit.id))
            .count()
    }

    /// A day counts only if it was logged and every current habit is completed
    fn all_completed_on(&self, date: NaiveDate) -> bool {
        self.history.has_day(date)
            && self.completed_on(date, self.habits.iter()) == self.habits.len()
    }
}

fn short_weekday(date: NaiveDate) -> &'static str {
    const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    DAYS[date.weekday().num_days_from_sunday() as usize]
}
