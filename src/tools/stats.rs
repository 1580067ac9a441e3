/// Tool for checking progress, streaks and completion rates
///
/// This module implements the habit_stats MCP tool.

use serde::Serialize;

use crate::analytics::{DayPoint, HabitStats, StatsSummary, TodayProgress};
use crate::clock::Clock;
use crate::storage::KeyValueStore;
use crate::tracker::{HabitStore, TrackerError};

/// Response from the stats tool
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub today: TodayProgress,
    pub summary: StatsSummary,
    pub week: Vec<DayPoint>,
    pub habits: Vec<HabitStats>,
    pub message: String,
}

/// Gather every statistic for the current state
pub fn get_habit_stats<S: KeyValueStore, C: Clock>(
    store: &HabitStore<S, C>,
) -> Result<StatsResponse, TrackerError> {
    let engine = store.stats();
    let today = engine.today_progress();
    let summary = engine.summary();
    let week = engine.week_series();
    let habits = engine.per_habit_stats();

    let message = if habits.is_empty() {
        "📊 No habits yet. Add habits to see performance stats.".to_string()
    } else {
        let headline = format!(
            "📊 Today: {}/{} completed ({}%)\n🔥 Current streak: {} | 🏆 Longest: {} | ✅ Rate: {}% | Total completed: {}",
            today.completed,
            today.total,
            today.percent,
            summary.current_streak,
            summary.longest_streak,
            summary.completion_rate,
            summary.total_completed
        );

        let week_line = week
            .iter()
            .map(|d| format!("{} {}: {}%", d.day_label, d.day_of_month, d.percent))
            .collect::<Vec<_>>()
            .join(" | ");

        let per_habit = habits
            .iter()
            .map(|h| {
                format!(
                    "{} {}: {}% (streak {})",
                    h.category.emoji(),
                    h.name,
                    h.percent,
                    h.streak
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n\n📅 Last 7 days: {}\n\n{}", headline, week_line, per_habit)
    };

    Ok(StatsResponse {
        today,
        summary,
        week,
        habits,
        message,
    })
}
