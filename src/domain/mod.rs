/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HistoryLog) and the streak
/// calculation over them, together with their validation rules.

pub mod habit;
pub mod history;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use history::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid category '{0}'. Valid options: health, productivity, learning, wellness, other")]
    InvalidCategory(String),
}
