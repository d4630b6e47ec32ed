/// JournalEntry entity for the daily journal
///
/// Each calendar day has at most one journal entry. Saving again on the same
/// day revises the existing entry instead of creating a second one.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{DomainError, HabitId, JournalEntryId};

const MAX_CONTENT_CHARS: usize = 10_000;
const MAX_TAGS: usize = 20;

/// A free-form journal entry for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    /// Day this entry is about
    pub date: NaiveDate,
    /// Markdown text as written by the user
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Mood rating from 1 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Habits this entry talks about
    #[serde(default)]
    pub habit_ids: Vec<HabitId>,
}

impl JournalEntry {
    /// Create a new journal entry with validation
    pub fn new(
        date: NaiveDate,
        content: &str,
        mood: Option<u8>,
        tags: Vec<String>,
        habit_ids: Vec<HabitId>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::validate_content(content)?;
        Self::validate_mood(mood)?;
        let tags = Self::normalize_tags(tags)?;

        Ok(Self {
            id: JournalEntryId::new(),
            date,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            mood,
            tags,
            habit_ids,
        })
    }

    /// Replace the entry's content, keeping its identity and creation time
    ///
    /// Mood and tags are only replaced when provided.
    pub fn revise(
        &mut self,
        content: &str,
        mood: Option<u8>,
        tags: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        Self::validate_content(content)?;
        Self::validate_mood(mood)?;
        let tags = tags.map(Self::normalize_tags).transpose()?;

        self.content = content.to_string();
        if mood.is_some() {
            self.mood = mood;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Number of whitespace-separated words in the entry
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(DomainError::InvalidValue {
                message: format!("Journal entries cannot be longer than {} characters", MAX_CONTENT_CHARS)
            });
        }
        Ok(())
    }

    fn validate_mood(mood: Option<u8>) -> Result<(), DomainError> {
        if let Some(rating) = mood {
            if !(1..=5).contains(&rating) {
                return Err(DomainError::InvalidValue {
                    message: "Mood must be between 1 and 5".to_string()
                });
            }
        }
        Ok(())
    }

    /// Trim, lowercase and deduplicate tags, keeping first-seen order
    fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, DomainError> {
        let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim().trim_start_matches('#').to_lowercase();
            if !tag.is_empty() && !normalized.contains(&tag) {
                normalized.push(tag);
            }
        }
        if normalized.len() > MAX_TAGS {
            return Err(DomainError::InvalidValue {
                message: format!("A journal entry can have at most {} tags", MAX_TAGS)
            });
        }
        Ok(normalized)
    }
}
