/// Tool for exporting all habit data
///
/// This module implements the habit_export MCP tool. The returned JSON is
/// meant to be saved to a file by the client.

use crate::clock::Clock;
use crate::storage::{KeyValueStore, StorageError};
use crate::tracker::{HabitStore, TrackerError};

/// Serialize the full store as pretty-printed JSON
pub fn export_habits<S: KeyValueStore, C: Clock>(
    store: &HabitStore<S, C>,
) -> Result<String, TrackerError> {
    let snapshot = store.export_snapshot();
    let json = serde_json::to_string_pretty(&snapshot).map_err(StorageError::from)?;

    tracing::info!(
        "Exported {} habits and {} logged days",
        snapshot.habits.len(),
        snapshot.history.len()
    );
    Ok(json)
}
