/// Tool for checking habit status and streaks
///
/// This module implements the habit_status MCP tool: the "today" view with
/// each habit's completion state, streaks and the last seven days.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::DailySummary;
use crate::domain::{format_day, plural, Habit};
use crate::tools::{find_habit, resolve_day, short_id};
use crate::{AppError, DayOneApp};

/// Parameters for checking habit status
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// ID or name of a specific habit (optional - shows all if omitted)
    #[serde(default)]
    pub habit_id: Option<String>,
    /// Day to show (YYYY-MM-DD, defaults to the selected day)
    #[serde(default)]
    pub date: Option<String>,
}

/// Information about a single habit's status
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub habit_id: String,
    pub name: String,
    pub frequency: String,
    pub completed: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
    pub last_completion: Option<String>,
    /// Completion of the last seven days, oldest first
    pub last_seven_days: Vec<bool>,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub date: String,
    pub habits: Vec<HabitStatus>,
    pub summary: DailySummary,
    pub message: String,
}

/// Get the today view for one or all habits
pub fn get_habit_status(app: &DayOneApp, params: StatusParams) -> Result<StatusResponse, AppError> {
    let state = app.state();
    let today = app.today();
    let day = resolve_day(params.date.as_deref(), state.selected_date)?;

    let habits: Vec<&Habit> = match params.habit_id.as_deref() {
        Some(reference) if !reference.trim().is_empty() => vec![find_habit(state, reference)?],
        _ => state.habits.iter().collect(),
    };

    let statuses: Vec<HabitStatus> = habits
        .iter()
        .map(|habit| {
            let streak = app.analytics().habit_streak(habit, today);
            let last_seven_days = app
                .analytics()
                .streak_grid(&habit.completions, day, 7)
                .into_iter()
                .flatten()
                .map(|cell| cell.completed)
                .collect();

            HabitStatus {
                habit_id: habit.id.to_string(),
                name: habit.name.clone(),
                frequency: habit.frequency.to_string(),
                completed: habit.is_completed_on(day),
                current_streak: streak.current_streak,
                longest_streak: streak.longest_streak,
                total_completions: streak.total_completions,
                last_completion: streak.last_completion.map(format_day),
                last_seven_days,
            }
        })
        .collect();

    let summary = app.analytics().today_summary(habits.iter().copied(), day);
    let message = render_status(&format_day(day), &statuses, &summary);

    Ok(StatusResponse {
        date: format_day(day),
        habits: statuses,
        summary,
        message,
    })
}

fn render_status(day: &str, statuses: &[HabitStatus], summary: &DailySummary) -> String {
    if statuses.is_empty() {
        return "No habits found. Create your first habit to get started!".to_string();
    }

    let header = format!(
        "📊 {}: {} of {} habits done ({}%)",
        day, summary.completed, summary.total, summary.rate
    );

    let lines = statuses
        .iter()
        .map(|h| {
            let week: String = h.last_seven_days.iter().map(|done| if *done { '■' } else { '□' }).collect();
            format!(
                "{} {} ({}...)\n   {} | 🔥 {} day{} | Best: {} day{} | {} total{}",
                if h.completed { "✅" } else { "⬜" },
                h.name,
                short_id(&h.habit_id),
                week,
                h.current_streak,
                plural(h.current_streak),
                h.longest_streak,
                plural(h.longest_streak),
                h.total_completions,
                match &h.last_completion {
                    Some(last) => format!("\n   Last completed: {}", last),
                    None => String::new(),
                }
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}", header, lines)
}
