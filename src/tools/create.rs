/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::storage::KeyValueStore;
use crate::tracker::{HabitStore, TrackerError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize)]
pub struct CreateHabitParams {
    pub name: String,
    pub category: String, // parsed into a Category by the store
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub message: String,
}

/// Create a new habit in the store
pub fn create_habit<S: KeyValueStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, TrackerError> {
    let habit = store.add_habit(&params.name, &params.category)?;

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!(
            "✅ Created habit '{}' in {} {}! Ready to start your streak!",
            habit.name,
            habit.category.emoji(),
            habit.category.display_name()
        ),
    })
}
