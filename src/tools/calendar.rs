/// Tool for the month calendar view
///
/// This module implements the habit_calendar MCP tool.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::analytics::{CalendarDay, CompletionLevel};
use crate::clock::Clock;
use crate::storage::KeyValueStore;
use crate::tracker::{HabitStore, TrackerError};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Parameters for the calendar; both default to the current month
#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub message: String,
}

/// Build the calendar for a month
pub fn get_habit_calendar<S: KeyValueStore, C: Clock>(
    store: &HabitStore<S, C>,
    params: CalendarParams,
) -> Result<CalendarResponse, TrackerError> {
    let today = store.today();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    let days = store.stats().month_calendar(year, month)?;
    let message = render_month(year, month, &days);

    Ok(CalendarResponse {
        year,
        month,
        days,
        message,
    })
}

/// Sunday-first grid, one week per line
fn render_month(year: i32, month: u32, days: &[CalendarDay]) -> String {
    let mut out = format!(
        "🗓️ {} {}\nSun Mon Tue Wed Thu Fri Sat\n",
        MONTH_NAMES[(month as usize).saturating_sub(1) % 12],
        year
    );

    let leading = days
        .first()
        .map(|d| d.date.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0);
    let mut cells: Vec<String> = vec!["   ".to_string(); leading];
    cells.extend(days.iter().map(|d| {
        let mark = match d.level {
            CompletionLevel::High => '#',
            CompletionLevel::Medium => '+',
            CompletionLevel::Low => '.',
            CompletionLevel::None if d.has_data => '-',
            CompletionLevel::None => ' ',
        };
        format!("{:>2}{}", d.date.day(), mark)
    }));

    for week in cells.chunks(7) {
        out.push_str(week.join(" ").trim_end());
        out.push('\n');
    }
    if let Some(today) = days.iter().find(|d| d.is_today) {
        out.push_str(&format!("Today: {}\n", today.date));
    }
    out.push_str("# ≥80%  + ≥50%  . >0%  - logged, none done");
    out
}
