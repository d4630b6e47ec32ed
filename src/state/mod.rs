/// Application state container
///
/// The whole application state is one immutable snapshot. Commands are run
/// through a pure reducer that produces the next snapshot, and the store
/// persists a snapshot only after it actually changed.

pub mod command;
pub mod store;

pub use command::*;
pub use store::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, HabitId, JournalEntry, ViewMode};

/// Everything the application knows, as one serializable record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub journal_entries: Vec<JournalEntry>,
    pub current_view: ViewMode,
    /// Day the today view and new completions refer to
    pub selected_date: NaiveDate,
    pub dark_mode: bool,
}

impl AppState {
    /// A fresh state with no habits, looking at `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            habits: Vec::new(),
            journal_entries: Vec::new(),
            current_view: ViewMode::Today,
            selected_date: today,
            dark_mode: false,
        }
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| &habit.id == habit_id)
    }

    /// The journal entry written for a given day, if any
    pub fn journal_entry_for(&self, day: NaiveDate) -> Option<&JournalEntry> {
        self.journal_entries.iter().find(|entry| entry.date == day)
    }
}
