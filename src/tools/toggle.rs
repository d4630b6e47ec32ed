/// Tool for marking habit completions
///
/// This module implements the habit_toggle MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{format_day, plural, StreakResult};
use crate::tools::{find_habit, resolve_day};
use crate::{AppError, Command, DayOneApp};

/// Parameters for marking a habit done or not done
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID or name of the habit
    pub habit_id: String,
    /// Day to mark (YYYY-MM-DD, defaults to the selected day)
    #[serde(default)]
    pub date: Option<String>,
    /// Set an explicit state instead of flipping the current one
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Response from marking a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub success: bool,
    pub completed: bool,
    pub streak: StreakResult,
    pub message: String,
}

/// Flip (or set) the completion of a habit on a day
pub fn toggle_habit(app: &mut DayOneApp, params: ToggleHabitParams) -> Result<ToggleHabitResponse, AppError> {
    let today = app.today();
    let habit_id = find_habit(app.state(), &params.habit_id)?.id.clone();
    let day = resolve_day(params.date.as_deref(), app.state().selected_date)?;

    if day > today {
        return Err(AppError::InvalidParams(format!(
            "Cannot mark habits for future dates ({} is after {})",
            format_day(day),
            format_day(today)
        )));
    }

    let command = match params.completed {
        Some(completed) => Command::SetCompletion { habit_id: habit_id.clone(), day, completed },
        None => Command::ToggleCompletion { habit_id: habit_id.clone(), day },
    };
    let state = app.dispatch(command)?;

    let habit = state
        .habit(&habit_id)
        .ok_or_else(|| AppError::Domain(crate::domain::DomainError::HabitNotFound(habit_id.to_string())))?;
    let completed = habit.is_completed_on(day);
    let streak = habit.streak(today);

    let message = if completed {
        format!(
            "🔥 Completed '{}' for {}! Current streak: {} day{}",
            habit.name,
            format_day(day),
            streak.current_streak,
            plural(streak.current_streak)
        )
    } else {
        format!("Unmarked '{}' for {}", habit.name, format_day(day))
    };

    Ok(ToggleHabitResponse {
        success: true,
        completed,
        streak,
        message,
    })
}
