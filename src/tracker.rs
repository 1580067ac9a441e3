/// Habit store: owns the habit collection and the history log
///
/// All mutations go through `HabitStore`. Each one updates the in-memory
/// state, refreshes the affected streak and saves both documents before
/// returning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::StatsEngine;
use crate::clock::Clock;
use crate::domain::{Category, DomainError, Habit, HabitId, HistoryLog, StreakCalculator};
use crate::query::QueryView;
use crate::storage::{KeyValueStore, StorageError, StorageKeys};

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Full exported state, ready to be written out as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub history: HistoryLog,
    pub exported_at: DateTime<Utc>,
}

/// The single owner of habit data for a session
pub struct HabitStore<S: KeyValueStore, C: Clock> {
    storage: S,
    clock: C,
    keys: StorageKeys,
    habits: Vec<Habit>,
    history: HistoryLog,
}

impl<S: KeyValueStore, C: Clock> HabitStore<S, C> {
    /// Load the store from `storage` using the default keys
    pub fn open(storage: S, clock: C) -> Result<Self, TrackerError> {
        Self::open_with_keys(storage, clock, StorageKeys::default())
    }

    /// Load the store from `storage` using the given (possibly per-user) keys
    ///
    /// Missing documents start out empty.
    pub fn open_with_keys(storage: S, clock: C, keys: StorageKeys) -> Result<Self, TrackerError> {
        let habits: Vec<Habit> = match storage.load(&keys.habits)? {
            Some(value) => serde_json::from_value(value).map_err(StorageError::from)?,
            None => Vec::new(),
        };
        let history: HistoryLog = match storage.load(&keys.history)? {
            Some(value) => serde_json::from_value(value).map_err(StorageError::from)?,
            None => HistoryLog::new(),
        };

        tracing::info!(
            "Loaded {} habits and {} logged days from '{}'",
            habits.len(),
            history.len(),
            keys.habits
        );

        Ok(Self {
            storage,
            clock,
            keys,
            habits,
            history,
        })
    }

    /// Habits in insertion order
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == *habit_id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Statistics over the current state, evaluated for today
    pub fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(&self.habits, &self.history, self.clock.today())
    }

    /// Filtered and grouped projections of the habit collection
    pub fn query(&self) -> QueryView<'_> {
        QueryView::new(&self.habits)
    }

    /// Create a habit from a raw name and category key
    pub fn add_habit(&mut self, name: &str, category: &str) -> Result<Habit, TrackerError> {
        let category: Category = category.parse()?;
        self.add_habit_in(name, category)
    }

    /// Create a habit in a known category
    pub fn add_habit_in(&mut self, name: &str, category: Category) -> Result<Habit, TrackerError> {
        let habit = Habit::new(name, category, self.clock.today())?;
        self.habits.push(habit.clone());

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        self.persist()?;
        Ok(habit)
    }

    /// Delete a habit and every history entry that references it
    ///
    /// Unknown ids are ignored. Empty day buckets are kept.
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<(), TrackerError> {
        let Some(position) = self.habits.iter().position(|habit| habit.id == *habit_id) else {
            tracing::debug!("Ignoring delete for unknown habit: {}", habit_id);
            return Ok(());
        };

        let removed = self.habits.remove(position);
        let entries = self.history.remove_habit(habit_id);

        tracing::debug!(
            "Deleted habit: {} ({}), dropped {} history entries",
            removed.name,
            habit_id,
            entries
        );
        self.persist()
    }

    /// Flip today's completion state for a habit and return the new state
    pub fn toggle_habit(&mut self, habit_id: &HabitId) -> Result<bool, TrackerError> {
        let today = self.clock.today();
        let position = self.position_of(habit_id)?;

        let completed = self.history.toggle(today, habit_id);
        let streak = StreakCalculator::compute(&self.history, habit_id, today);
        self.habits[position].streak = streak;

        tracing::debug!(
            "Toggled habit {} on {}: completed={}, streak={}",
            habit_id,
            today,
            completed,
            streak
        );
        self.persist()?;
        Ok(completed)
    }

    /// Whether the habit is marked completed today
    pub fn is_completed_today(&self, habit_id: &HabitId) -> Result<bool, TrackerError> {
        self.position_of(habit_id)?;
        Ok(self.history.is_completed(self.clock.today(), habit_id))
    }

    /// Full state plus an export timestamp
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            habits: self.habits.clone(),
            history: self.history.clone(),
            exported_at: self.clock.now(),
        }
    }

    fn position_of(&self, habit_id: &HabitId) -> Result<usize, TrackerError> {
        self.habits
            .iter()
            .position(|habit| habit.id == *habit_id)
            .ok_or_else(|| TrackerError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    /// Save both documents; in-memory state is kept even if this fails
    fn persist(&self) -> Result<(), TrackerError> {
        let habits = serde_json::to_value(&self.habits).map_err(StorageError::from)?;
        let history = serde_json::to_value(&self.history).map_err(StorageError::from)?;

        self.storage
            .save_all(&[(self.keys.habits.as_str(), habits), (self.keys.history.as_str(), history)])
            .map_err(|e| {
                tracing::warn!("Failed to persist habit data: {}", e);
                TrackerError::from(e)
            })
    }
}
