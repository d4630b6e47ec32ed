/// Storage layer for persisting application state
///
/// This module handles all database operations using SQLite. The unit of
/// persistence is the whole AppState snapshot: it is loaded once at start-up
/// and written back after every change.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::state::AppState;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Corrupt record in {table}: {message}")]
    Corrupt { table: &'static str, message: String },
}

/// Trait defining how application state is persisted
///
/// This trait allows us to swap out SQLite for other backends (or test
/// doubles) while the state store stays the same.
pub trait StateStorage {
    /// Load the last saved snapshot, or None if nothing was saved yet
    fn load_state(&self) -> Result<Option<AppState>, StorageError>;

    /// Replace the saved snapshot with this one
    fn save_state(&self, state: &AppState) -> Result<(), StorageError>;
}
