/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool. Confirmation is the
/// caller's job; once invoked the deletion is unconditional.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::HabitId;
use crate::storage::KeyValueStore;
use crate::tracker::{HabitStore, TrackerError};

/// Parameters for deleting a habit
#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    /// Whether a habit with that id existed
    pub deleted: bool,
    pub message: String,
}

/// Delete a habit and its history
pub fn delete_habit<S: KeyValueStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, TrackerError> {
    let habit_id = HabitId::from_string(&params.habit_id);
    let name = store.habit(&habit_id).map(|habit| habit.name.clone());

    store.delete_habit(&habit_id)?;

    let message = match &name {
        Some(name) => format!("🗑️ Deleted habit '{}' and its history", name),
        None => format!("No habit with id {}; nothing to delete", habit_id),
    };

    Ok(DeleteHabitResponse {
        deleted: name.is_some(),
        message,
    })
}
