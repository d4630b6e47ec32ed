/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier types, the habit Frequency, the view
/// modes of the application and the strict calendar-day parser used at the
/// tool boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::DomainError;

/// Format used for every calendar-day identifier
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass a habit ID where a journal entry ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a journal entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JournalEntryId(pub Uuid);

impl JournalEntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for JournalEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JournalEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit should be performed
///
/// Frequency is descriptive: streaks are always counted in calendar days
/// regardless of the frequency a habit was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every single day
    #[default]
    Daily,
    /// Once a week
    Weekly,
    /// Every N days (e.g., every 3 days)
    Custom(u32),
}

impl Frequency {
    /// Parse a frequency name as typed by a user
    ///
    /// `custom` needs an interval; it defaults to every 2 days when omitted.
    pub fn parse(name: &str, interval: Option<u32>) -> Result<Self, DomainError> {
        let frequency = match name.trim().to_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "custom" => Frequency::Custom(interval.unwrap_or(2)),
            other => {
                return Err(DomainError::InvalidFrequency(format!(
                    "Invalid frequency '{}'. Valid options: daily, weekly, custom",
                    other
                )))
            }
        };
        frequency.validate()?;
        Ok(frequency)
    }

    /// Validate that a frequency value is reasonable
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Frequency::Custom(days) = self {
            if *days == 0 {
                return Err(DomainError::InvalidFrequency(
                    "Interval must be at least 1 day".to_string()
                ));
            }
            if *days > 365 {
                return Err(DomainError::InvalidFrequency(
                    "Interval cannot be longer than 365 days".to_string()
                ));
            }
        }
        Ok(())
    }

    /// Name stored in the database and shown in tool output
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Custom(_) => "custom",
        }
    }

    /// Interval in days for custom frequencies
    pub fn interval(&self) -> Option<u32> {
        match self {
            Frequency::Custom(days) => Some(*days),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Custom(1) => write!(f, "every day"),
            Frequency::Custom(days) => write!(f, "every {} days", days),
        }
    }
}

/// Which view of the application is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Today,
    Weekly,
    Overall,
}

impl ViewMode {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(ViewMode::Today),
            "weekly" => Ok(ViewMode::Weekly),
            "overall" => Ok(ViewMode::Overall),
            other => Err(DomainError::Validation {
                message: format!("Unknown view '{}'. Valid options: today, weekly, overall", other),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Today => "today",
            ViewMode::Weekly => "weekly",
            ViewMode::Overall => "overall",
        }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar day
pub fn parse_day(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s)))
}

/// Format a calendar day as `YYYY-MM-DD`
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}
