/// Commands and the pure reducer that applies them
///
/// Every user action is a Command. `reduce` never mutates its input: it
/// returns the next snapshot, which is equal to the current one when the
/// command had nothing to do.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{DomainError, Frequency, Habit, HabitId, JournalEntry, ViewMode};
use crate::state::AppState;

/// A mutation of the application state
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddHabit {
        name: String,
        description: String,
        frequency: Frequency,
        color: Option<String>,
        icon: Option<String>,
    },
    DeleteHabit {
        habit_id: HabitId,
    },
    /// Flip the completion state of a habit on a day
    ToggleCompletion {
        habit_id: HabitId,
        day: NaiveDate,
    },
    /// Mark or unmark a day explicitly; repeating it changes nothing
    SetCompletion {
        habit_id: HabitId,
        day: NaiveDate,
        completed: bool,
    },
    /// Create or revise the journal entry for a day
    SaveJournalEntry {
        day: NaiveDate,
        content: String,
        mood: Option<u8>,
        tags: Option<Vec<String>>,
        habit_ids: Vec<HabitId>,
    },
    SelectDate {
        day: NaiveDate,
    },
    SetView {
        view: ViewMode,
    },
    SetDarkMode {
        enabled: bool,
    },
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddHabit { .. } => "add_habit",
            Command::DeleteHabit { .. } => "delete_habit",
            Command::ToggleCompletion { .. } => "toggle_completion",
            Command::SetCompletion { .. } => "set_completion",
            Command::SaveJournalEntry { .. } => "save_journal_entry",
            Command::SelectDate { .. } => "select_date",
            Command::SetView { .. } => "set_view",
            Command::SetDarkMode { .. } => "set_dark_mode",
        }
    }
}

/// Apply a command to a snapshot, producing the next snapshot
///
/// `now` stamps creation and update times; it is passed in so the reducer
/// stays deterministic.
pub fn reduce(state: &AppState, command: Command, now: DateTime<Utc>) -> Result<AppState, DomainError> {
    let mut next = state.clone();

    match command {
        Command::AddHabit { name, description, frequency, color, icon } => {
            if name.trim().is_empty() {
                return Ok(next);
            }
            let habit = Habit::new(&name, &description, frequency, now)?.with_style(color, icon)?;
            next.habits.push(habit);
        }
        Command::DeleteHabit { habit_id } => {
            let before = next.habits.len();
            next.habits.retain(|habit| habit.id != habit_id);
            if next.habits.len() == before {
                return Err(DomainError::HabitNotFound(habit_id.to_string()));
            }
            for entry in &mut next.journal_entries {
                entry.habit_ids.retain(|id| *id != habit_id);
            }
        }
        Command::ToggleCompletion { habit_id, day } => {
            habit_mut(&mut next, &habit_id)?.completions.toggle(day);
        }
        Command::SetCompletion { habit_id, day, completed } => {
            let completions = &mut habit_mut(&mut next, &habit_id)?.completions;
            if completed {
                completions.add(day);
            } else {
                completions.remove(day);
            }
        }
        Command::SaveJournalEntry { day, content, mood, tags, habit_ids } => {
            if content.trim().is_empty() {
                return Ok(next);
            }
            for habit_id in &habit_ids {
                if next.habit(habit_id).is_none() {
                    return Err(DomainError::HabitNotFound(habit_id.to_string()));
                }
            }
            match next.journal_entries.iter_mut().find(|entry| entry.date == day) {
                Some(entry) => {
                    entry.revise(&content, mood, tags, now)?;
                    if !habit_ids.is_empty() {
                        entry.habit_ids = habit_ids;
                    }
                }
                None => {
                    let entry = JournalEntry::new(day, &content, mood, tags.unwrap_or_default(), habit_ids, now)?;
                    next.journal_entries.push(entry);
                    next.journal_entries.sort_by_key(|entry| entry.date);
                }
            }
        }
        Command::SelectDate { day } => next.selected_date = day,
        Command::SetView { view } => next.current_view = view,
        Command::SetDarkMode { enabled } => next.dark_mode = enabled,
    }

    Ok(next)
}

fn habit_mut<'a>(state: &'a mut AppState, habit_id: &HabitId) -> Result<&'a mut Habit, DomainError> {
    state
        .habits
        .iter_mut()
        .find(|habit| &habit.id == habit_id)
        .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))
}
