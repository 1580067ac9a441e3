/// Habit entity and related functionality
///
/// This module defines the Habit record a user tracks daily, along with the
/// validation applied when one is created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, DomainError, HabitId};

/// A habit is something the user wants to do every day
///
/// The JSON shape (`id`, `name`, `category`, `createdAt`, `streak`) is the
/// persisted format, so field names are serialized in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier, assigned at creation and never changed
    pub id: HabitId,
    /// Trimmed, non-empty display name
    pub name: String,
    /// Category for organization
    pub category: Category,
    /// Calendar day the habit was created
    pub created_at: NaiveDate,
    /// Cached current streak; recomputed whenever the habit is toggled
    #[serde(default)]
    pub streak: u32,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The name is trimmed before it is stored. A fresh id is generated and
    /// the streak starts at zero.
    pub fn new(name: &str, category: Category, created_at: NaiveDate) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            category,
            created_at,
            streak: 0,
        })
    }

    /// Whether the habit existed on the given day
    pub fn exists_on(&self, date: NaiveDate) -> bool {
        self.created_at <= date
    }

    /// Validate habit name according to business rules, returning the trimmed name
    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        Ok(trimmed.to_string())
    }
}
