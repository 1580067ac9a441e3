/// Tool for marking a habit done (or not done) today
///
/// This module implements the habit_toggle MCP tool.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::{HabitId, StreakCalculator};
use crate::storage::KeyValueStore;
use crate::tracker::{HabitStore, TrackerError};

/// Parameters for toggling a habit
#[derive(Debug, Deserialize)]
pub struct ToggleHabitParams {
    pub habit_id: String,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub completed: bool,
    pub current_streak: u32,
    pub message: String,
}

/// Flip today's completion state for a habit
pub fn toggle_habit<S: KeyValueStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    params: ToggleHabitParams,
) -> Result<ToggleHabitResponse, TrackerError> {
    let habit_id = HabitId::from_string(&params.habit_id);
    let completed = store.toggle_habit(&habit_id)?;

    let (name, streak) = store
        .habit(&habit_id)
        .map(|habit| (habit.name.clone(), habit.streak))
        .unwrap_or_default();

    let message = if completed {
        format!(
            "🔥 Marked '{}' done for today! Current streak: {} day{}\n{}",
            name,
            streak,
            if streak == 1 { "" } else { "s" },
            StreakCalculator::milestone_message(streak)
        )
    } else {
        format!("↩️ Marked '{}' as not done today", name)
    };

    Ok(ToggleHabitResponse {
        completed,
        current_streak: streak,
        message,
    })
}
