/// Tool for listing habits
///
/// This module implements the habit_list MCP tool: a flat or grouped listing
/// with per-category counts.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::domain::{Category, CategoryFilter, Habit};
use crate::query::CategoryCounts;
use crate::storage::KeyValueStore;
use crate::tracker::{HabitStore, TrackerError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize)]
pub struct ListHabitsParams {
    pub category: Option<String>, // "all" or a category key
    pub view: Option<String>,     // "list" (default) or "grouped"
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub category: Category,
    pub current_streak: u32,
    pub completed_today: bool,
    pub created_at: String,
}

/// Habits of one category, for the grouped view
#[derive(Debug, Serialize)]
pub struct HabitGroup {
    /// `None` for the flat listing
    pub category: Option<Category>,
    pub habits: Vec<HabitSummary>,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub groups: Vec<HabitGroup>,
    pub counts: CategoryCounts,
    pub grouped: bool,
    pub message: String,
}

/// List habits from the store
pub fn list_habits<S: KeyValueStore, C: Clock>(
    store: &HabitStore<S, C>,
    params: ListHabitsParams,
) -> Result<ListHabitsResponse, TrackerError> {
    let filter: CategoryFilter = match params.category.as_deref() {
        Some(raw) => raw.parse()?,
        None => CategoryFilter::All,
    };
    let grouped = match params.view.as_deref().map(str::trim) {
        None | Some("") | Some("list") => false,
        Some("grouped") => true,
        Some(other) => {
            return Err(TrackerError::Validation(crate::domain::DomainError::Validation {
                message: format!("Invalid view '{}'. Valid options: list, grouped", other),
            }))
        }
    };

    let query = store.query();
    let summarize = |habit: &Habit| HabitSummary {
        habit_id: habit.id.to_string(),
        name: habit.name.clone(),
        category: habit.category,
        current_streak: habit.streak,
        completed_today: store.history().is_completed(store.today(), &habit.id),
        created_at: habit.created_at.to_string(),
    };

    let groups: Vec<HabitGroup> = if grouped {
        query
            .grouped_matching(filter)
            .into_iter()
            .map(|(category, habits)| HabitGroup {
                category: Some(category),
                habits: habits.into_iter().map(&summarize).collect(),
            })
            .collect()
    } else {
        let habits: Vec<HabitSummary> = query.filtered(filter).into_iter().map(&summarize).collect();
        if habits.is_empty() {
            Vec::new()
        } else {
            vec![HabitGroup { category: None, habits }]
        }
    };

    let counts = query.category_counts();
    let message = render_listing(&groups, &counts, store.habits().is_empty());

    Ok(ListHabitsResponse {
        groups,
        counts,
        grouped,
        message,
    })
}

fn render_listing(groups: &[HabitGroup], counts: &CategoryCounts, no_habits: bool) -> String {
    if no_habits {
        return "No habits yet. Create your first habit to get started!".to_string();
    }
    if groups.is_empty() {
        return "No habits in this category".to_string();
    }

    let line = |h: &HabitSummary| {
        format!(
            "{} {} **{}** ({})\n   🔥 Streak: {} day{} | Since {}",
            if h.completed_today { "✅" } else { "⬜" },
            h.category.emoji(),
            h.name,
            h.habit_id,
            h.current_streak,
            if h.current_streak == 1 { "" } else { "s" },
            h.created_at
        )
    };

    let body = groups
        .iter()
        .map(|group| {
            let lines = group.habits.iter().map(&line).collect::<Vec<_>>().join("\n");
            match group.category {
                Some(category) => {
                    let n = group.habits.len();
                    format!(
                        "{} **{}** ({} habit{})\n{}",
                        category.emoji(),
                        category.display_name(),
                        n,
                        if n == 1 { "" } else { "s" },
                        lines
                    )
                }
                None => lines,
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let tally = Category::ALL
        .iter()
        .map(|c| format!("{} {}", c.display_name(), counts.get(CategoryFilter::Only(*c))))
        .collect::<Vec<_>>()
        .join(" | ");

    format!("📋 **Habits** ({} total)\n\n{}\n\n{}", counts.all, body, tally)
}
