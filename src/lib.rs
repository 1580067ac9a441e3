/// Public library interface for the Habit Tracker
///
/// This module exports the habit store, the statistics engine, the storage
/// backends and the MCP server that exposes them as tools.

use std::path::PathBuf;
use thiserror::Error;

pub mod analytics;
pub mod clock;
pub mod domain;
pub mod mcp;
pub mod query;
pub mod storage;
pub mod tools;
pub mod tracker;

// Re-export public modules and types
pub use analytics::{CalendarDay, CompletionLevel, StatsEngine};
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::*;
pub use query::{CategoryCounts, QueryView};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageKeys};
pub use tracker::{HabitStore, Snapshot, TrackerError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Habit store error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker server exposing a habit store over MCP
///
/// Production servers persist to SQLite and read the system clock; tests can
/// plug in any store and clock through [`HabitTrackerServer::with_store`].
pub struct HabitTrackerServer<S: KeyValueStore = SqliteStore, C: Clock = SystemClock> {
    store: HabitStore<S, C>,
}

impl HabitTrackerServer<SqliteStore, SystemClock> {
    /// Open the SQLite database at `db_path`, creating its schema if needed
    ///
    /// With a `user_id`, habit data lives under that user's namespaced keys.
    pub fn new(db_path: PathBuf, user_id: Option<&str>) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Tracker server with database: {:?}", db_path);

        let storage = SqliteStore::new(&db_path)?;
        let keys = StorageKeys::for_user(user_id);
        let store = HabitStore::open_with_keys(storage, SystemClock, keys)?;

        Ok(Self { store })
    }
}

impl<S: KeyValueStore, C: Clock> HabitTrackerServer<S, C> {
    /// Build a server over an arbitrary backend and clock using the default keys
    pub fn with_store(storage: S, clock: C) -> Result<Self, ServerError> {
        Ok(Self {
            store: HabitStore::open(storage, clock)?,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Server started successfully, found {} existing habits",
            self.store.habits().len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await
    }

    pub fn store(&self) -> &HabitStore<S, C> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HabitStore<S, C> {
        &mut self.store
    }
}
