/// Analytics engine for the today, weekly and overall views
///
/// This module aggregates per-habit streak statistics into the summaries the
/// views display. It only ever calls the pure streak functions, so every
/// method here is deterministic for a given reference day.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{
    compute_streaks, compute_window_rate, plural, rounded_percentage, week_bounds, CompletionSet, Habit,
    HabitId, JournalEntry, StreakResult, WindowRate,
};

/// Reflective prompts offered when a journal entry is started
const JOURNAL_PROMPTS: [&str; 7] = [
    "What are you most grateful for today?",
    "What challenged you today and how did you handle it?",
    "What small win can you celebrate today?",
    "How did your habits serve you today?",
    "What would make tomorrow even better?",
    "What did you learn about yourself today?",
    "How are you feeling right now, and why?",
];

/// How many of today's habits are done
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    pub completed: u32,
    pub total: u32,
    pub rate: u32,
}

/// One habit's progress over the selected week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitWeek {
    pub habit_id: HabitId,
    pub name: String,
    pub week: WindowRate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyOverview {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub habits: Vec<HabitWeek>,
    pub total_completions: u32,
    pub active_habits: u32,
    /// Mean of the per-habit weekly rates, rounded
    pub average_rate: u32,
}

/// One habit's lifetime statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitOverall {
    pub habit_id: HabitId,
    pub name: String,
    pub streak: StreakResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallOverview {
    pub total_habits: u32,
    pub total_completions: u32,
    pub best_current_streak: u32,
    pub longest_streak: u32,
    pub habits: Vec<HabitOverall>,
}

/// One day in a streak grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day: NaiveDate,
    pub completed: bool,
    pub is_reference_day: bool,
}

/// Analytics engine for processing habit data
///
/// The engine is stateless; it exists so callers have a single place to
/// ask for view-level statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// Streak statistics for one habit
    pub fn habit_streak(&self, habit: &Habit, reference_day: NaiveDate) -> StreakResult {
        compute_streaks(&habit.completions, reference_day)
    }

    /// Share of habits completed on a day
    pub fn today_summary<'a>(&self, habits: impl IntoIterator<Item = &'a Habit>, day: NaiveDate) -> DailySummary {
        let (completed, total) = habits.into_iter().fold((0, 0), |(completed, total), habit| {
            (completed + u32::from(habit.is_completed_on(day)), total + 1)
        });

        DailySummary {
            day,
            completed,
            total,
            rate: rounded_percentage(completed, total),
        }
    }

    /// Completion rates for the Sunday-to-Saturday week around `selected_day`
    pub fn weekly_overview(&self, habits: &[Habit], selected_day: NaiveDate) -> WeeklyOverview {
        let (week_start, week_end) = week_bounds(selected_day);

        let weeks: Vec<HabitWeek> = habits
            .iter()
            .map(|habit| HabitWeek {
                habit_id: habit.id.clone(),
                name: habit.name.clone(),
                week: compute_window_rate(&habit.completions, week_start, week_end),
            })
            .collect();

        let total_completions = weeks.iter().map(|w| w.week.completed).sum();
        let rate_sum: u32 = weeks.iter().map(|w| w.week.rate).sum();

        WeeklyOverview {
            week_start,
            week_end,
            total_completions,
            active_habits: weeks.len() as u32,
            average_rate: rounded_percentage(rate_sum, weeks.len() as u32 * 100),
            habits: weeks,
        }
    }

    /// Lifetime totals and streak records across all habits
    pub fn overall_overview(&self, habits: &[Habit], reference_day: NaiveDate) -> OverallOverview {
        let per_habit: Vec<HabitOverall> = habits
            .iter()
            .map(|habit| HabitOverall {
                habit_id: habit.id.clone(),
                name: habit.name.clone(),
                streak: self.habit_streak(habit, reference_day),
            })
            .collect();

        OverallOverview {
            total_habits: per_habit.len() as u32,
            total_completions: per_habit.iter().map(|h| h.streak.total_completions).sum(),
            best_current_streak: per_habit.iter().map(|h| h.streak.current_streak).max().unwrap_or(0),
            longest_streak: per_habit.iter().map(|h| h.streak.longest_streak).max().unwrap_or(0),
            habits: per_habit,
        }
    }

    /// The last `days` days ending at `end_day`, in rows of seven
    pub fn streak_grid(&self, completions: &CompletionSet, end_day: NaiveDate, days: u32) -> Vec<Vec<GridCell>> {
        if days == 0 {
            return Vec::new();
        }
        let start = end_day - Duration::days(i64::from(days) - 1);

        let cells: Vec<GridCell> = start
            .iter_days()
            .take(days as usize)
            .map(|day| GridCell {
                day,
                completed: completions.contains(day),
                is_reference_day: day == end_day,
            })
            .collect();

        cells.chunks(7).map(<[GridCell]>::to_vec).collect()
    }

    /// Short observations about the user's habits and journal
    pub fn generate_insights(
        &self,
        habits: &[Habit],
        journal_entries: &[JournalEntry],
        reference_day: NaiveDate,
    ) -> Vec<String> {
        let mut insights = Vec::new();

        if habits.is_empty() {
            insights.push("Start by creating your first habit to track!".to_string());
            return insights;
        }

        let overview = self.overall_overview(habits, reference_day);
        if overview.total_completions == 0 {
            insights.push("Great job creating habits! Now start marking your progress.".to_string());
        } else {
            insights.push(format!(
                "You have {} habit{} with {} total completion{}. Keep up the great work!",
                overview.total_habits,
                plural(overview.total_habits),
                overview.total_completions,
                plural(overview.total_completions),
            ));
        }

        if let Some(best) = overview.habits.iter().max_by_key(|h| h.streak.current_streak) {
            if best.streak.current_streak > 1 {
                insights.push(format!(
                    "'{}' is your hottest streak at {} days.",
                    best.name, best.streak.current_streak
                ));
            }
        }

        let at_risk: Vec<&str> = habits
            .iter()
            .filter(|habit| {
                let yesterday = reference_day.pred_opt();
                !habit.is_completed_on(reference_day)
                    && yesterday.map_or(false, |day| habit.is_completed_on(day))
            })
            .map(|habit| habit.name.as_str())
            .collect();
        if !at_risk.is_empty() {
            insights.push(format!(
                "Complete {} today to keep the streak alive.",
                at_risk.join(", ")
            ));
        }

        let (week_start, _) = week_bounds(reference_day);
        let journaled = journal_entries
            .iter()
            .filter(|entry| entry.date >= week_start && entry.date <= reference_day)
            .count();
        if journaled > 0 {
            insights.push(format!("You journaled on {} day{} this week.", journaled, plural(journaled as u32)));
        }

        insights
    }

    /// A reflective prompt for the journal, stable for a given day
    pub fn journal_prompt(&self, day: NaiveDate) -> &'static str {
        JOURNAL_PROMPTS[day.ordinal0() as usize % JOURNAL_PROMPTS.len()]
    }
}
