/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier and category types shared by habits,
/// the history log, and the query/statistics views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// Identifiers are opaque strings. New habits get a UUID v4; identifiers loaded
/// from older data (for example timestamp-derived ones) are kept as stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string (as received from a caller or storage)
    pub fn from_string(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categories for organizing habits into life areas
///
/// The set is fixed. Variant order is the display order used by grouped views,
/// so `Ord` is derived from declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Exercise, diet, sleep
    Health,
    /// Work habits and focus
    Productivity,
    /// Studying, reading, skill building
    Learning,
    /// Meditation, reflection, self-care
    Wellness,
    /// Anything else
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Productivity,
        Category::Learning,
        Category::Wellness,
        Category::Other,
    ];

    /// Stable lowercase key used in storage and tool arguments
    pub fn key(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Productivity => "productivity",
            Category::Learning => "learning",
            Category::Wellness => "wellness",
            Category::Other => "other",
        }
    }

    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Productivity => "Productivity",
            Category::Learning => "Learning",
            Category::Wellness => "Wellness",
            Category::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Health => "🏃",
            Category::Productivity => "💼",
            Category::Learning => "📚",
            Category::Wellness => "🧘",
            Category::Other => "📌",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.key() == s)
            .ok_or_else(|| DomainError::InvalidCategory(s.to_string()))
    }
}

/// Category selector used by filtered views: everything, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a habit of the given category passes this filter
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}
