/// Date-indexed completion log
///
/// The history maps a calendar day to the completion state of each habit on
/// that day. A habit with no entry for a day and a habit explicitly recorded
/// as not done are different states in the log; the statistics collapse both
/// to "not completed".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;

/// Completion states recorded for a single day
pub type DayRecord = BTreeMap<HabitId, bool>;

/// Completion log keyed by calendar day
///
/// Days serialize as `YYYY-MM-DD`, so the `BTreeMap` ordering, the string
/// ordering of the keys and chronological order all agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw three-state read: `Some(true)`, `Some(false)`, or `None` when nothing was recorded
    pub fn entry(&self, date: NaiveDate, habit_id: &HabitId) -> Option<bool> {
        self.days.get(&date).and_then(|day| day.get(habit_id)).copied()
    }

    /// Whether the habit is recorded as completed on `date`
    pub fn is_completed(&self, date: NaiveDate, habit_id: &HabitId) -> bool {
        self.entry(date, habit_id).unwrap_or(false)
    }

    /// The record for a day, if any data was logged that day
    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    /// Whether a bucket exists for the day (it may be empty)
    pub fn has_day(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Logged days in chronological order with their records
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &DayRecord)> {
        self.days.iter().map(|(date, record)| (*date, record))
    }

    /// Logged days in chronological order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Flip the completion state of a habit on a day and return the new state
    ///
    /// The day bucket and the entry are created as needed; a missing entry
    /// counts as `false` before the flip. Entries are never removed here, so
    /// toggling off leaves an explicit `false` behind.
    pub fn toggle(&mut self, date: NaiveDate, habit_id: &HabitId) -> bool {
        let state = self
            .days
            .entry(date)
            .or_default()
            .entry(habit_id.clone())
            .or_insert(false);
        *state = !*state;
        *state
    }

    /// Remove every entry for a habit; returns how many entries were dropped
    ///
    /// Day buckets that become empty are kept.
    pub fn remove_habit(&mut self, habit_id: &HabitId) -> usize {
        self.days
            .values_mut()
            .filter_map(|day| day.remove(habit_id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_creates_and_flips() {
        let mut log = HistoryLog::new();
        let id = HabitId::from_string("h1");

        assert_eq!(log.entry(day(2024, 1, 1), &id), None);
        assert!(log.toggle(day(2024, 1, 1), &id));
        assert_eq!(log.entry(day(2024, 1, 1), &id), Some(true));
        assert!(!log.toggle(day(2024, 1, 1), &id));
        // toggled off, but the explicit false stays in the log
        assert_eq!(log.entry(day(2024, 1, 1), &id), Some(false));
        assert!(!log.is_completed(day(2024, 1, 1), &id));
    }

    #[test]
    fn test_remove_habit_keeps_empty_days() {
        let mut log = HistoryLog::new();
        let a = HabitId::from_string("a");
        let b = HabitId::from_string("b");
        log.toggle(day(2024, 1, 1), &a);
        log.toggle(day(2024, 1, 2), &a);
        log.toggle(day(2024, 1, 2), &b);

        assert_eq!(log.remove_habit(&a), 2);
        assert_eq!(log.len(), 2);
        assert!(log.day(day(2024, 1, 1)).unwrap().is_empty());
        assert!(log.iter().all(|(_, record)| !record.contains_key(&a)));
        assert!(log.is_completed(day(2024, 1, 2), &b));
    }

    #[test]
    fn test_json_keys_are_iso_days_in_order() {
        let raw = r#"{"2024-01-10":{"h1":true},"2024-01-02":{"h1":false}}"#;
        let log: HistoryLog = serde_json::from_str(raw).unwrap();
        let dates: Vec<NaiveDate> = log.dates().collect();
        assert_eq!(dates, vec![day(2024, 1, 2), day(2024, 1, 10)]);
        assert_eq!(
            serde_json::to_string(&log).unwrap(),
            r#"{"2024-01-02":{"h1":false},"2024-01-10":{"h1":true}}"#
        );
    }
}
