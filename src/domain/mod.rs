/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionSet, JournalEntry)
/// and the streak engine that derives statistics from completion history.
/// Everything here is pure: no storage, no clocks, no I/O.

pub mod habit;
pub mod completion;
pub mod journal;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use completion::*;
pub use journal::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Habit not found: {0}")]
    HabitNotFound(String),
}
