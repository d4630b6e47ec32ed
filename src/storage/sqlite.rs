/// SQLite implementation of the state storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving the application snapshot. It handles all SQL queries and
/// data conversion.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{
    parse_day, format_day, CompletionSet, Frequency, Habit, HabitId, JournalEntry, JournalEntryId, ViewMode,
};
use crate::state::AppState;
use crate::storage::{migrations, StateStorage, StorageError};

const PREF_CURRENT_VIEW: &str = "current_view";
const PREF_SELECTED_DATE: &str = "selected_date";
const PREF_DARK_MODE: &str = "dark_mode";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// the StateStorage trait on top of normalised tables.
pub struct SqliteStorage {
    conn: Connection,
}

/// A habit row before its fields have been validated
struct HabitRow {
    id: String,
    name: String,
    description: String,
    frequency: String,
    frequency_interval: Option<u32>,
    color: Option<String>,
    icon: Option<String>,
    created_at: DateTime<Utc>,
}

/// A journal row before its JSON columns have been decoded
struct JournalRow {
    id: String,
    date: NaiveDate,
    content: String,
    mood: Option<u8>,
    tags: String,
    habit_ids: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Create a storage backed by a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Enable foreign key constraints
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    fn preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM preferences WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut completions = self.load_completions()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, frequency, frequency_interval, color, icon, created_at
             FROM habits ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(HabitRow {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                frequency: row.get(3)?,
                frequency_interval: row.get(4)?,
                color: row.get(5)?,
                icon: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;

        let mut habits = Vec::new();
        for row in rows {
            let row = row?;
            let id = HabitId::parse(&row.id).map_err(|e| StorageError::Corrupt {
                table: "habits",
                message: format!("invalid id {:?}: {}", row.id, e),
            })?;
            let frequency = Frequency::parse(&row.frequency, row.frequency_interval).map_err(|e| {
                StorageError::Corrupt { table: "habits", message: e.to_string() }
            })?;
            let days = completions.remove(&row.id).unwrap_or_default();

            habits.push(Habit {
                id,
                name: row.name,
                description: row.description,
                frequency,
                completions: CompletionSet::parse_lenient(days),
                created_at: row.created_at,
                color: row.color,
                icon: row.icon,
            });
        }

        Ok(habits)
    }

    /// Raw completion days grouped by habit id
    fn load_completions(&self) -> Result<HashMap<String, Vec<String>>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT habit_id, day FROM habit_completions")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let (habit_id, day) = row?;
            grouped.entry(habit_id).or_default().push(day);
        }
        Ok(grouped)
    }

    fn load_journal_entries(&self) -> Result<Vec<JournalEntry>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, content, mood, tags, habit_ids, created_at, updated_at
             FROM journal_entries ORDER BY date",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(JournalRow {
                id: row.get(0)?,
                date: row.get(1)?,
                content: row.get(2)?,
                mood: row.get(3)?,
                tags: row.get(4)?,
                habit_ids: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row?;
            let id = JournalEntryId::parse(&row.id).map_err(|e| StorageError::Corrupt {
                table: "journal_entries",
                message: format!("invalid id {:?}: {}", row.id, e),
            })?;

            entries.push(JournalEntry {
                id,
                date: row.date,
                content: row.content,
                created_at: row.created_at,
                updated_at: row.updated_at,
                mood: row.mood,
                tags: serde_json::from_str(&row.tags)?,
                habit_ids: serde_json::from_str(&row.habit_ids)?,
            });
        }

        Ok(entries)
    }
}

impl StateStorage for SqliteStorage {
    fn load_state(&self) -> Result<Option<AppState>, StorageError> {
        // A snapshot always writes its selected date, so its absence means
        // nothing was ever saved.
        let Some(selected_date) = self.preference(PREF_SELECTED_DATE)? else {
            return Ok(None);
        };
        let selected_date = parse_day(&selected_date).map_err(|e| StorageError::Corrupt {
            table: "preferences",
            message: e.to_string(),
        })?;

        let current_view = match self.preference(PREF_CURRENT_VIEW)? {
            Some(view) => ViewMode::parse(&view).unwrap_or_else(|_| {
                tracing::warn!("Unknown saved view {:?}, falling back to today", view);
                ViewMode::Today
            }),
            None => ViewMode::Today,
        };
        let dark_mode = self.preference(PREF_DARK_MODE)?.as_deref() == Some("true");

        Ok(Some(AppState {
            habits: self.load_habits()?,
            journal_entries: self.load_journal_entries()?,
            current_view,
            selected_date,
            dark_mode,
        }))
    }

    fn save_state(&self, state: &AppState) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute_batch(
            "DELETE FROM habit_completions;
             DELETE FROM habits;
             DELETE FROM journal_entries;
             DELETE FROM preferences;",
        )?;

        {
            let mut insert_habit = tx.prepare(
                "INSERT INTO habits (
                    id, name, description, frequency, frequency_interval, color, icon, position, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            let mut insert_completion = tx.prepare(
                "INSERT INTO habit_completions (habit_id, day) VALUES (?1, ?2)",
            )?;

            for (position, habit) in state.habits.iter().enumerate() {
                let habit_id = habit.id.to_string();
                insert_habit.execute(params![
                    habit_id,
                    habit.name,
                    habit.description,
                    habit.frequency.name(),
                    habit.frequency.interval(),
                    habit.color,
                    habit.icon,
                    position as i64,
                    habit.created_at,
                ])?;
                for day in habit.completions.iter() {
                    insert_completion.execute(params![habit_id, format_day(day)])?;
                }
            }

            let mut insert_entry = tx.prepare(
                "INSERT INTO journal_entries (
                    id, date, content, mood, tags, habit_ids, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for entry in &state.journal_entries {
                insert_entry.execute(params![
                    entry.id.to_string(),
                    entry.date,
                    entry.content,
                    entry.mood,
                    serde_json::to_string(&entry.tags)?,
                    serde_json::to_string(&entry.habit_ids)?,
                    entry.created_at,
                    entry.updated_at,
                ])?;
            }

            let mut insert_preference = tx.prepare("INSERT INTO preferences (key, value) VALUES (?1, ?2)")?;
            insert_preference.execute(params![PREF_CURRENT_VIEW, state.current_view.name()])?;
            insert_preference.execute(params![PREF_SELECTED_DATE, format_day(state.selected_date)])?;
            insert_preference.execute(params![PREF_DARK_MODE, state.dark_mode.to_string()])?;
        }

        tx.commit()?;

        tracing::debug!(
            "Saved state: {} habits, {} journal entries",
            state.habits.len(),
            state.journal_entries.len()
        );
        Ok(())
    }
}
