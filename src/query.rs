/// Filtered, grouped and counted projections of the habit collection

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Category, CategoryFilter, Habit};

/// Habit counts per category plus the overall total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub all: usize,
    /// Every category, including those with no habits
    #[serde(flatten)]
    pub by_category: BTreeMap<Category, usize>,
}

impl CategoryCounts {
    pub fn get(&self, filter: CategoryFilter) -> usize {
        match filter {
            CategoryFilter::All => self.all,
            CategoryFilter::Only(category) => self.by_category.get(&category).copied().unwrap_or(0),
        }
    }
}

/// Read-only view over habits in insertion order
pub struct QueryView<'a> {
    habits: &'a [Habit],
}

impl<'a> QueryView<'a> {
    pub fn new(habits: &'a [Habit]) -> Self {
        Self { habits }
    }

    /// Habits passing the filter, in insertion order
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&'a Habit> {
        self.habits
            .iter()
            .filter(|habit| filter.matches(habit.category))
            .collect()
    }

    /// Habits grouped by category in display order; empty categories are left out
    pub fn grouped(&self) -> BTreeMap<Category, Vec<&'a Habit>> {
        self.grouped_matching(CategoryFilter::All)
    }

    /// Grouped view restricted to the categories the filter accepts
    pub fn grouped_matching(&self, filter: CategoryFilter) -> BTreeMap<Category, Vec<&'a Habit>> {
        let mut groups: BTreeMap<Category, Vec<&'a Habit>> = BTreeMap::new();
        for habit in self.filtered(filter) {
            groups.entry(habit.category).or_default().push(habit);
        }
        groups
    }

    pub fn category_counts(&self) -> CategoryCounts {
        let mut by_category: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|category| (*category, 0)).collect();
        for habit in self.habits {
            *by_category.entry(habit.category).or_default() += 1;
        }

        CategoryCounts {
            all: self.habits.len(),
            by_category,
        }
    }
}
