/// MCP tools for habit tracking and journaling
///
/// This module contains all the MCP tools that external clients can call.
/// Each tool takes a deserialized parameter struct and returns a response
/// struct whose `message` is what the client gets to read.

pub mod create;
pub mod toggle;
pub mod delete;
pub mod status;
pub mod weekly;
pub mod overall;
pub mod journal;
pub mod settings;

// Re-export tool functions for easy access
pub use create::*;
pub use toggle::*;
pub use delete::*;
pub use status::*;
pub use weekly::*;
pub use overall::*;
pub use journal::*;
pub use settings::*;

use chrono::NaiveDate;

use crate::domain::{parse_day, Habit, HabitId};
use crate::{AppError, AppState};

/// Parse an optional `YYYY-MM-DD` parameter, falling back to `default`
pub(crate) fn resolve_day(raw: Option<&str>, default: NaiveDate) -> Result<NaiveDate, AppError> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            parse_day(value).map_err(|e| AppError::InvalidParams(e.to_string()))
        }
        _ => Ok(default),
    }
}

/// Find a habit by id or by case-insensitive name
///
/// Clients often only remember the name they gave a habit, so both are
/// accepted wherever a habit is referenced.
pub(crate) fn find_habit<'a>(state: &'a AppState, reference: &str) -> Result<&'a Habit, AppError> {
    if reference.trim().is_empty() {
        return Err(AppError::InvalidParams("Habit ID cannot be empty".to_string()));
    }
    if let Ok(habit_id) = HabitId::parse(reference) {
        if let Some(habit) = state.habit(&habit_id) {
            return Ok(habit);
        }
    }
    let wanted = reference.trim().to_lowercase();
    state
        .habits
        .iter()
        .find(|habit| habit.name.to_lowercase() == wanted)
        .ok_or_else(|| AppError::Domain(crate::domain::DomainError::HabitNotFound(reference.to_string())))
}

/// An application on a fresh in-memory database, pinned to 2024-01-03
#[cfg(test)]
pub(crate) fn test_app() -> crate::DayOneApp {
    let config = crate::AppConfig::new(std::path::PathBuf::from(":memory:"))
        .with_reference_day(Some(parse_day("2024-01-03").unwrap()));
    let storage = crate::SqliteStorage::open_in_memory().unwrap();
    crate::DayOneApp::with_storage(storage, config).unwrap()
}

/// First eight characters of an id, for compact listings
pub(crate) fn short_id(habit_id: &str) -> &str {
    habit_id.get(..8).unwrap_or(habit_id)
}
