/// Behavioural tests for the habit store and its statistics
use chrono::NaiveDate;
use habit_tracker::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        let id = store.add_habit("Stretch", "wellness").unwrap().id;

        assert!(store.toggle_habit(&id).unwrap());
        assert!(!store.toggle_habit(&id).unwrap());

        assert!(!store.is_completed_today(&id).unwrap());
        assert_eq!(store.history().entry(day(2024, 6, 10), &id), Some(false));
        assert_eq!(store.habit(&id).unwrap().streak, 0);
    }

    #[test]
    fn test_streak_builds_and_breaks() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        let id = store.add_habit("Run", "health").unwrap().id;

        for _ in 0..3 {
            store.toggle_habit(&id).unwrap();
            clock.advance_days(1);
        }
        assert_eq!(store.habit(&id).unwrap().streak, 3);

        // skip a day, then start again
        clock.advance_days(1);
        store.toggle_habit(&id).unwrap();
        assert_eq!(store.habit(&id).unwrap().streak, 1);
        assert_eq!(store.stats().current_all_streak(), 1);
        assert_eq!(store.stats().longest_all_streak(), 4);
    }

    #[test]
    fn test_all_habit_streak_needs_every_habit() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        let a = store.add_habit("Run", "health").unwrap().id;
        let b = store.add_habit("Read", "learning").unwrap().id;

        store.toggle_habit(&a).unwrap();
        assert_eq!(store.stats().current_all_streak(), 0);
        assert_eq!(store.stats().today_progress().percent, 50);

        store.toggle_habit(&b).unwrap();
        assert_eq!(store.stats().current_all_streak(), 1);
        assert_eq!(store.stats().today_progress().percent, 100);
    }

    #[test]
    fn test_delete_removes_history() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        let keep = store.add_habit("Run", "health").unwrap().id;
        let gone = store.add_habit("Read", "learning").unwrap().id;
        store.toggle_habit(&gone).unwrap();
        clock.advance_days(1);
        store.toggle_habit(&gone).unwrap();
        store.toggle_habit(&keep).unwrap();

        store.delete_habit(&gone).unwrap();

        assert!(store.habit(&gone).is_none());
        assert!(store
            .history()
            .iter()
            .all(|(_, record)| !record.contains_key(&gone)));
        // the emptied day is still logged
        assert!(store.history().has_day(day(2024, 6, 10)));
        assert_eq!(store.stats().summary().total_completed, 1);

        // unknown ids are ignored
        store.delete_habit(&HabitId::from_string("missing")).unwrap();
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_unknown_habit_toggle_fails() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();

        let result = store.toggle_habit(&HabitId::from_string("nope"));
        assert!(matches!(result, Err(TrackerError::HabitNotFound { .. })));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_validation_errors() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();

        assert!(matches!(
            store.add_habit("   ", "health"),
            Err(TrackerError::Validation(DomainError::InvalidHabitName(_)))
        ));
        assert!(matches!(
            store.add_habit("Swim", "sports"),
            Err(TrackerError::Validation(DomainError::InvalidCategory(_)))
        ));
        assert!(store.habits().is_empty());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_long_names_are_stored() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();

        let name = "x".repeat(101);
        let habit = store.add_habit(&name, "health").unwrap();

        assert_eq!(habit.name, name);
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        store.storage().set_reject_writes(true);

        let result = store.add_habit("Run", "health");

        assert!(matches!(
            result,
            Err(TrackerError::Storage(StorageError::WriteRejected { .. }))
        ));
        assert_eq!(store.habits().len(), 1);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_reopen_from_same_backend() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let backend = MemoryStore::new();
        let id = {
            let mut store = HabitStore::open(&backend, &clock).unwrap();
            let id = store.add_habit("Journal", "productivity").unwrap().id;
            store.toggle_habit(&id).unwrap();
            id
        };

        let store = HabitStore::open(&backend, &clock).unwrap();
        assert_eq!(store.habits()[0].name, "Journal");
        assert!(store.is_completed_today(&id).unwrap());
        assert_eq!(store.habit(&id).unwrap().streak, 1);
    }

    #[test]
    fn test_legacy_documents_load() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let backend = MemoryStore::new();
        backend
            .save(
                StorageKeys::HABITS,
                &serde_json::json!([
                    {"id": "1718000000000", "name": "Walk", "category": "health", "createdAt": "2024-06-01"}
                ]),
            )
            .unwrap();
        backend
            .save(
                StorageKeys::HISTORY,
                &serde_json::json!({"2024-06-09": {"1718000000000": true}}),
            )
            .unwrap();

        let store = HabitStore::open(&backend, &clock).unwrap();
        let id = HabitId::from_string("1718000000000");

        // the streak field is optional and defaults to zero
        assert_eq!(store.habit(&id).unwrap().streak, 0);
        assert!(store.history().is_completed(day(2024, 6, 9), &id));
        assert_eq!(StreakCalculator::compute(store.history(), &id, day(2024, 6, 9)), 1);
    }

    #[test]
    fn test_category_counts_and_grouping() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        store.add_habit("Run", "health").unwrap();
        store.add_habit("Read", "learning").unwrap();
        store.add_habit("Lift", "health").unwrap();

        let counts = store.query().category_counts();
        assert_eq!(counts.all, 3);
        assert_eq!(counts.get(CategoryFilter::Only(Category::Health)), 2);
        assert_eq!(counts.get(CategoryFilter::Only(Category::Wellness)), 0);

        let health: Vec<&str> = store
            .query()
            .filtered(CategoryFilter::Only(Category::Health))
            .iter()
            .map(|habit| habit.name.as_str())
            .collect();
        assert_eq!(health, vec!["Run", "Lift"]);

        let grouped = store.query().grouped();
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![Category::Health, Category::Learning]);
    }

    #[test]
    fn test_week_series_and_calendar() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        let id = store.add_habit("Run", "health").unwrap().id;
        store.toggle_habit(&id).unwrap();

        let week = store.stats().week_series();
        assert_eq!(week.len(), 7);
        assert_eq!(week[6].date, day(2024, 6, 10));
        assert_eq!(week[6].percent, 100);
        // the habit did not exist yet
        assert_eq!(week[0].total, 0);

        let june = store.stats().month_calendar(2024, 6).unwrap();
        assert_eq!(june.len(), 30);
        assert_eq!(june[9].level, CompletionLevel::High);
        assert!(!june[8].has_data);
    }

    #[test]
    fn test_snapshot_export() {
        let clock = FixedClock::new(day(2024, 6, 10));
        let mut store = HabitStore::open(MemoryStore::new(), &clock).unwrap();
        store.add_habit("Run", "health").unwrap();

        let snapshot = store.export_snapshot();
        assert_eq!(snapshot.habits, store.habits());
        assert_eq!(snapshot.exported_at.date_naive(), day(2024, 6, 10));
    }
}
