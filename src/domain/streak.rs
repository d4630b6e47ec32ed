/// Streak calculation and windowed completion rates
///
/// Everything in this module is a pure function of a CompletionSet and an
/// explicit reference day. Nothing reads the clock, so the same inputs
/// always produce the same result.

use serde::{Deserialize, Serialize};
use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::CompletionSet;

/// Streak statistics for one habit as of a reference day
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakResult {
    /// Unbroken run ending on the reference day or the day before it
    pub current_streak: u32,
    /// Largest run of consecutive days anywhere in the history
    pub longest_streak: u32,
    /// Number of distinct completion days
    pub total_completions: u32,
    /// Most recent completion day (None if never completed)
    pub last_completion: Option<NaiveDate>,
}

/// Completion count over an inclusive window of days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowRate {
    pub completed: u32,
    pub total: u32,
    /// Whole percentage in 0..=100
    pub rate: u32,
}

/// Compute current streak, longest streak and totals for a completion set
pub fn compute_streaks(completions: &CompletionSet, reference_day: NaiveDate) -> StreakResult {
    if completions.is_empty() {
        return StreakResult::default();
    }

    let current_streak = current_streak(completions, reference_day);
    let longest_streak = longest_streak(completions);

    StreakResult {
        current_streak,
        longest_streak: longest_streak.max(current_streak),
        total_completions: completions.len() as u32,
        last_completion: completions.last(),
    }
}

/// Count completions inside `[window_start, window_end]` and express them as
/// a rounded percentage of the days in that window
pub fn compute_window_rate(
    completions: &CompletionSet,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> WindowRate {
    if window_end < window_start {
        return WindowRate::default();
    }

    let total = (window_end - window_start).num_days() as u32 + 1;
    let completed = completions.count_between(window_start, window_end) as u32;

    WindowRate {
        completed,
        total,
        rate: rounded_percentage(completed, total),
    }
}

/// `round(100 * part / whole)` with halves rounded up, 0 for an empty whole
pub fn rounded_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    ((200 * part + whole) / (2 * whole)) as u32
}

/// The Sunday-to-Saturday week containing `day`
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
    (start, start + Duration::days(6))
}

impl StreakResult {
    /// Whether the habit still has a live streak as of the reference day
    pub fn is_active(&self) -> bool {
        self.current_streak > 0
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 if self.total_completions == 0 => {
                "Ready to start your streak! Every journey begins with a single step.".to_string()
            }
            0 => format!(
                "Streak paused. Your best run was {} day{}; today is a good day to start again.",
                self.longest_streak,
                plural(self.longest_streak)
            ),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current_streak),
            30..=99 => format!("Incredible! {} days of consistency. You're a habit master!", self.current_streak),
            _ => format!("Legendary! {} days of unwavering commitment. You're an inspiration!", self.current_streak),
        }
    }
}

/// "s" suffix for day counts
pub fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn current_streak(completions: &CompletionSet, reference_day: NaiveDate) -> u32 {
    // Today not done yet still keeps yesterday's run alive.
    let start = if completions.contains(reference_day) {
        reference_day
    } else {
        match reference_day.pred_opt() {
            Some(yesterday) if completions.contains(yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut checking = Some(start);
    while let Some(day) = checking {
        if !completions.contains(day) {
            break;
        }
        streak += 1;
        checking = day.pred_opt();
    }
    streak
}

fn longest_streak(completions: &CompletionSet) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in completions.iter() {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}
