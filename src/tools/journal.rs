/// Tools for the daily journal
///
/// This module implements the journal_save and journal_get MCP tools. There
/// is one entry per day; saving again revises it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{format_day, HabitId, JournalEntry};
use crate::tools::{find_habit, resolve_day};
use crate::{AppError, Command, DayOneApp};

/// Parameters for saving a journal entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveJournalParams {
    /// Markdown text of the entry
    pub content: String,
    /// Day the entry is about (YYYY-MM-DD, defaults to the selected day)
    #[serde(default)]
    pub date: Option<String>,
    /// Mood from 1 (low) to 5 (great)
    #[serde(default)]
    pub mood: Option<u8>,
    /// Tags for the entry; replaces existing tags when given
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// IDs or names of habits the entry mentions
    #[serde(default)]
    pub habit_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SaveJournalResponse {
    pub success: bool,
    pub entry: Option<JournalEntry>,
    pub message: String,
}

/// Parameters for reading a journal entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetJournalParams {
    /// Day to read (YYYY-MM-DD, defaults to the selected day)
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetJournalResponse {
    pub date: String,
    pub entry: Option<JournalEntry>,
    /// Offered when the day has no entry yet
    pub prompt: Option<String>,
    pub message: String,
}

/// Create or revise the journal entry for a day
///
/// Blank content saves nothing and reports so instead of failing.
pub fn save_journal_entry(app: &mut DayOneApp, params: SaveJournalParams) -> Result<SaveJournalResponse, AppError> {
    let day = resolve_day(params.date.as_deref(), app.state().selected_date)?;

    if params.content.trim().is_empty() {
        return Ok(SaveJournalResponse {
            success: false,
            entry: None,
            message: "Nothing to save: the journal entry is empty.".to_string(),
        });
    }

    let habit_ids = params
        .habit_ids
        .unwrap_or_default()
        .iter()
        .map(|reference| find_habit(app.state(), reference).map(|habit| habit.id.clone()))
        .collect::<Result<Vec<HabitId>, AppError>>()?;

    let existed = app.state().journal_entry_for(day).is_some();
    let state = app.dispatch(Command::SaveJournalEntry {
        day,
        content: params.content,
        mood: params.mood,
        tags: params.tags,
        habit_ids,
    })?;

    let entry = state.journal_entry_for(day).cloned();
    let words = entry.as_ref().map_or(0, JournalEntry::word_count);

    Ok(SaveJournalResponse {
        success: true,
        entry,
        message: format!(
            "📝 {} journal entry for {} ({} word{})",
            if existed { "Updated" } else { "Saved" },
            format_day(day),
            words,
            if words == 1 { "" } else { "s" }
        ),
    })
}

/// Read the journal entry for a day
pub fn get_journal_entry(app: &DayOneApp, params: GetJournalParams) -> Result<GetJournalResponse, AppError> {
    let state = app.state();
    let day = resolve_day(params.date.as_deref(), state.selected_date)?;

    let Some(entry) = state.journal_entry_for(day) else {
        let prompt = app.analytics().journal_prompt(day);
        return Ok(GetJournalResponse {
            date: format_day(day),
            entry: None,
            prompt: Some(prompt.to_string()),
            message: format!("No journal entry for {} yet.\n💭 {}", format_day(day), prompt),
        });
    };

    let mut message = format!("📖 Journal for {}", format_day(day));
    if let Some(mood) = entry.mood {
        message.push_str(&format!(" (mood {}/5)", mood));
    }
    message.push_str(&format!("\n\n{}", entry.content));
    if !entry.tags.is_empty() {
        let tags: Vec<String> = entry.tags.iter().map(|tag| format!("#{}", tag)).collect();
        message.push_str(&format!("\n\n{}", tags.join(" ")));
    }
    let habits: Vec<&str> = entry
        .habit_ids
        .iter()
        .filter_map(|id| state.habit(id))
        .map(|habit| habit.name.as_str())
        .collect();
    if !habits.is_empty() {
        message.push_str(&format!("\nHabits: {}", habits.join(", ")));
    }

    Ok(GetJournalResponse {
        date: format_day(day),
        entry: Some(entry.clone()),
        prompt: None,
        message,
    })
}
