/// Completion history for a single habit
///
/// A CompletionSet holds the calendar days a habit was performed on. It has
/// set semantics: marking the same day twice records it once, and iteration
/// is always in calendar order.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DAY_FORMAT;

/// The calendar days on which a habit was completed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet {
    days: BTreeSet<NaiveDate>,
}

impl CompletionSet {
    /// Create an empty completion set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw day strings, dropping anything that isn't a date
    ///
    /// Accepts plain `YYYY-MM-DD` days as well as RFC 3339 timestamps, which
    /// are reduced to the calendar day in their own offset. Malformed input is
    /// logged and skipped so a single bad record can't poison the history.
    pub fn parse_lenient<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for value in raw {
            let value = value.as_ref().trim();
            match parse_completion_day(value) {
                Some(day) => {
                    set.add(day);
                }
                None => tracing::warn!("Discarding malformed completion date: {:?}", value),
            }
        }
        set
    }

    /// Record a completion; returns false if the day was already present
    pub fn add(&mut self, day: NaiveDate) -> bool {
        self.days.insert(day)
    }

    /// Remove a completion; returns false if the day wasn't present
    pub fn remove(&mut self, day: NaiveDate) -> bool {
        self.days.remove(&day)
    }

    /// Flip the completion state of a day, returning the new state
    pub fn toggle(&mut self, day: NaiveDate) -> bool {
        if self.days.remove(&day) {
            false
        } else {
            self.days.insert(day);
            true
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending calendar order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Earliest completion
    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Most recent completion
    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Number of completions in the inclusive range `[start, end]`
    pub fn count_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        if end < start {
            return 0;
        }
        self.days.range(start..=end).count()
    }
}

impl FromIterator<NaiveDate> for CompletionSet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for CompletionSet {
    fn extend<T: IntoIterator<Item = NaiveDate>>(&mut self, iter: T) {
        self.days.extend(iter);
    }
}

fn parse_completion_day(value: &str) -> Option<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(value, DAY_FORMAT) {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}
