/// Integration tests against the SQLite backend and the MCP server
use chrono::NaiveDate;
use habit_tracker::mcp::McpServer;
use habit_tracker::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("habits.db");
        let clock = FixedClock::new(day(2024, 3, 1));

        let (run, read) = {
            let storage = SqliteStore::new(&db_path).expect("Failed to open database");
            let mut store = HabitStore::open(storage, &clock).expect("Failed to open store");
            let run = store.add_habit("Run", "health").unwrap().id;
            let read = store.add_habit("Read", "learning").unwrap().id;

            store.toggle_habit(&run).unwrap();
            clock.advance_days(1);
            store.toggle_habit(&run).unwrap();
            store.toggle_habit(&read).unwrap();
            (run, read)
        };

        let storage = SqliteStore::new(&db_path).expect("Failed to reopen database");
        let store = HabitStore::open(storage, &clock).expect("Failed to reopen store");

        assert_eq!(store.habits().len(), 2);
        assert_eq!(store.habit(&run).unwrap().streak, 2);
        assert_eq!(store.habit(&read).unwrap().streak, 1);
        assert!(store.history().is_completed(day(2024, 3, 1), &run));
        assert_eq!(store.history().entry(day(2024, 3, 1), &read), None);

        let summary = store.stats().summary();
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.total_completed, 3);
        assert_eq!(summary.completion_rate, 75);
    }

    #[test]
    fn test_persisted_documents_use_wire_format() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = SqliteStore::new(dir.path().join("habits.db")).unwrap();
        let clock = FixedClock::new(day(2024, 3, 1));
        let mut store = HabitStore::open(&storage, &clock).unwrap();

        let id = store.add_habit("Meditate", "wellness").unwrap().id;
        store.toggle_habit(&id).unwrap();

        let habits = storage.load(StorageKeys::HABITS).unwrap().unwrap();
        assert_eq!(
            habits,
            json!([{
                "id": id.as_str(),
                "name": "Meditate",
                "category": "wellness",
                "createdAt": "2024-03-01",
                "streak": 1
            }])
        );

        let history = storage.load(StorageKeys::HISTORY).unwrap().unwrap();
        assert_eq!(history, json!({ "2024-03-01": { id.as_str(): true } }));
    }

    #[test]
    fn test_users_are_isolated() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = SqliteStore::new(dir.path().join("habits.db")).unwrap();
        let clock = FixedClock::new(day(2024, 3, 1));

        {
            let mut alice =
                HabitStore::open_with_keys(&storage, &clock, StorageKeys::for_user(Some("alice"))).unwrap();
            alice.add_habit("Run", "health").unwrap();
        }

        let bob = HabitStore::open_with_keys(&storage, &clock, StorageKeys::for_user(Some("bob"))).unwrap();
        assert!(bob.habits().is_empty());

        let anonymous = HabitStore::open(&storage, &clock).unwrap();
        assert!(anonymous.habits().is_empty());

        let alice = HabitStore::open_with_keys(&storage, &clock, StorageKeys::for_user(Some("alice"))).unwrap();
        assert_eq!(alice.habits().len(), 1);
        assert!(storage.load("user:alice:habits").unwrap().is_some());
    }

    #[test]
    fn test_server_opens_database() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("habits.db");

        let server = HabitTrackerServer::new(db_path.clone(), None).expect("Failed to create server");
        assert!(server.store().habits().is_empty());
        drop(server);

        let server = HabitTrackerServer::new(db_path, Some("alice")).expect("Failed to reopen server");
        assert!(server.store().habits().is_empty());
    }

    #[tokio::test]
    async fn test_mcp_session_over_sqlite() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = SqliteStore::new(dir.path().join("habits.db")).unwrap();
        let clock = FixedClock::new(day(2024, 3, 1));
        let tracker = HabitTrackerServer::with_store(storage, clock).unwrap();
        let mut server = McpServer::new(tracker);

        let requests = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "habit_create", "arguments": {"name": "Run", "category": "health"}}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "habit_list", "arguments": {"view": "grouped"}}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "habit_export", "arguments": {}}}),
        ];
        let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        // the notification gets no response
        assert_eq!(responses.len(), 4);
        assert!(server.is_initialized());
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"]["isError"], false);

        let listing = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
        assert!(listing.contains("Run"));

        let exported = responses[3]["result"]["content"][0]["text"].as_str().unwrap();
        let snapshot: Snapshot = serde_json::from_str(exported).unwrap();
        assert_eq!(snapshot.habits.len(), 1);
        assert_eq!(snapshot.habits[0].category, Category::Health);
    }
}
