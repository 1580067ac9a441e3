/// Month calendar view of the history log
///
/// Each day of a month is classified by how many of the current habits were
/// completed on it.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::analytics::StatsEngine;
use crate::domain::DomainError;

/// Completion band for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionLevel {
    None,
    Low,
    Medium,
    High,
}

impl CompletionLevel {
    /// Band for a completion percentage: high from 80, medium from 50, low above 0
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 80.0 {
            CompletionLevel::High
        } else if percent >= 50.0 {
            CompletionLevel::Medium
        } else if percent > 0.0 {
            CompletionLevel::Low
        } else {
            CompletionLevel::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    /// A bucket exists for the day and there is at least one habit
    pub has_data: bool,
    pub level: CompletionLevel,
}

impl<'a> StatsEngine<'a> {
    /// Every day of `month` (1-12) in `year`, first to last
    pub fn month_calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>, DomainError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| DomainError::Validation {
            message: format!("Invalid calendar month {}-{:02}", year, month),
        })?;

        let days = first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(|date| {
                let has_data = self.history.has_day(date) && !self.habits.is_empty();
                let level = if has_data {
                    let completed = self.completed_on(date, self.habits.iter());
                    CompletionLevel::from_percent(completed as f64 * 100.0 / self.habits.len() as f64)
                } else {
                    CompletionLevel::None
                };

                CalendarDay {
                    date,
                    is_today: date == self.today,
                    has_data,
                    level,
                }
            })
            .collect();

        Ok(days)
    }
}
