/// Public library interface for the DayOne habit tracker
///
/// This module exports the application type, the streak engine and the
/// public domain types so they can be used by the binary, by other
/// applications, and by tests.

use thiserror::Error;

// Internal modules
mod domain;
mod state;
mod storage;
mod analytics;
mod tools;
mod mcp;
pub mod config;

// Re-export public modules and types
pub use domain::*;
pub use state::{reduce, AppState, Command, StateStore};
pub use storage::{SqliteStorage, StateStorage, StorageError};
pub use analytics::{
    AnalyticsEngine, DailySummary, GridCell, HabitOverall, HabitWeek, OverallOverview, WeeklyOverview,
};
pub use config::AppConfig;
pub use mcp::McpServer;

/// Errors that can occur while running the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The habit tracker application
///
/// Owns the state store (backed by SQLite), the analytics engine and the
/// configuration that decides which day counts as "today".
pub struct DayOneApp {
    store: StateStore<SqliteStorage>,
    analytics: AnalyticsEngine,
    config: AppConfig,
}

impl DayOneApp {
    /// Open the application with the database named in the configuration
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        tracing::info!("Initializing DayOne with database: {:?}", config.database_path);

        let storage = SqliteStorage::new(&config.database_path)?;
        Self::with_storage(storage, config)
    }

    /// Open the application on an already constructed storage
    pub fn with_storage(storage: SqliteStorage, config: AppConfig) -> Result<Self, AppError> {
        let mut store = StateStore::open(storage, config.today())?;

        // The selected day always starts out as today, like a fresh page.
        store.dispatch(Command::SelectDate { day: config.today() })?;

        Ok(Self {
            store,
            analytics: AnalyticsEngine::new(),
            config,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), AppError> {
        tracing::info!(
            "Starting MCP server with {} existing habits",
            self.store.state().habits.len()
        );

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await
    }

    /// The day treated as "today"
    pub fn today(&self) -> chrono::NaiveDate {
        self.config.today()
    }

    /// Current state snapshot
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Apply a command and persist the resulting snapshot
    pub fn dispatch(&mut self, command: Command) -> Result<&AppState, AppError> {
        self.store.dispatch(command)
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
