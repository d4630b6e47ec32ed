/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do regularly, together with its completion history.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{compute_streaks, CompletionSet, DomainError, Frequency, HabitId, StreakResult};

/// A habit represents something the user wants to do regularly
///
/// This is the core entity in our system. Each habit has a name, a frequency
/// and the set of days it was completed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning meditation")
    pub name: String,
    /// Free-form description, empty when the user gave none
    #[serde(default)]
    pub description: String,
    /// How often this habit should be performed
    pub frequency: Frequency,
    /// Days this habit was completed on
    #[serde(default)]
    pub completions: CompletionSet,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// Optional accent colour for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Optional icon name for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Name and description are trimmed before they are validated and stored.
    pub fn new(
        name: &str,
        description: &str,
        frequency: Frequency,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        let description = description.trim();

        Self::validate_name(name)?;
        Self::validate_description(description)?;
        frequency.validate()?;

        Ok(Self {
            id: HabitId::new(),
            name: name.to_string(),
            description: description.to_string(),
            frequency,
            completions: CompletionSet::new(),
            created_at,
            color: None,
            icon: None,
        })
    }

    /// Attach display styling to the habit
    pub fn with_style(mut self, color: Option<String>, icon: Option<String>) -> Result<Self, DomainError> {
        self.color = Self::validate_label("Color", color)?;
        self.icon = Self::validate_label("Icon", icon)?;
        Ok(self)
    }

    /// Whether the habit was completed on a given day
    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completions.contains(day)
    }

    /// Streak statistics as of a reference day
    pub fn streak(&self, reference_day: NaiveDate) -> StreakResult {
        compute_streaks(&self.completions, reference_day)
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if name.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.chars().count() > 500 {
            return Err(DomainError::Validation {
                message: "Description cannot be longer than 500 characters".to_string()
            });
        }
        Ok(())
    }

    /// Blank labels are dropped, overly long ones rejected
    fn validate_label(field: &str, value: Option<String>) -> Result<Option<String>, DomainError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > 32 {
            return Err(DomainError::InvalidValue {
                message: format!("{} cannot be longer than 32 characters", field)
            });
        }
        Ok(Some(trimmed.to_string()))
    }
}
