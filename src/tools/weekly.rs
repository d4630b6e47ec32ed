/// Tool for the weekly overview
///
/// This module implements the weekly_overview MCP tool: per-habit completion
/// rates for the Sunday-to-Saturday week around a day, plus a 30-day grid.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{GridCell, WeeklyOverview};
use crate::domain::{format_day, plural};
use crate::tools::{find_habit, resolve_day};
use crate::{AppError, DayOneApp};

/// Days covered by the grid shown under each habit
const GRID_DAYS: u32 = 30;

/// Parameters for the weekly overview
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeeklyParams {
    /// Any day inside the week to show (YYYY-MM-DD, defaults to the selected day)
    #[serde(default)]
    pub date: Option<String>,
    /// ID or name of a habit to include its 30-day grid
    #[serde(default)]
    pub habit_id: Option<String>,
}

/// Response from the weekly overview
#[derive(Debug, Serialize)]
pub struct WeeklyResponse {
    pub overview: WeeklyOverview,
    /// Rows of seven days ending at the requested day, when a habit was named
    pub grid: Option<Vec<Vec<GridCell>>>,
    pub message: String,
}

pub fn weekly_overview(app: &DayOneApp, params: WeeklyParams) -> Result<WeeklyResponse, AppError> {
    let state = app.state();
    let day = resolve_day(params.date.as_deref(), state.selected_date)?;
    let overview = app.analytics().weekly_overview(&state.habits, day);

    let grid = match params.habit_id.as_deref() {
        Some(reference) if !reference.trim().is_empty() => {
            let habit = find_habit(state, reference)?;
            Some(app.analytics().streak_grid(&habit.completions, day, GRID_DAYS))
        }
        _ => None,
    };

    let message = render_week(&overview, grid.as_deref());

    Ok(WeeklyResponse { overview, grid, message })
}

fn render_week(overview: &WeeklyOverview, grid: Option<&[Vec<GridCell>]>) -> String {
    let mut message = format!(
        "📅 Week of {} to {}\n",
        format_day(overview.week_start),
        format_day(overview.week_end)
    );

    if overview.habits.is_empty() {
        message.push_str("No habits yet. Create one to see your week.");
        return message;
    }

    message.push_str(&format!(
        "{} completion{} across {} habit{}, average {}%\n",
        overview.total_completions,
        plural(overview.total_completions),
        overview.active_habits,
        plural(overview.active_habits),
        overview.average_rate
    ));

    for habit in &overview.habits {
        message.push_str(&format!(
            "\n• {}: {}/{} days ({}%)",
            habit.name, habit.week.completed, habit.week.total, habit.week.rate
        ));
    }

    if let Some(rows) = grid {
        message.push_str("\n\nLast 30 days:\n");
        let lines: Vec<String> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match (cell.completed, cell.is_reference_day) {
                        (true, _) => '■',
                        (false, true) => '◇',
                        (false, false) => '□',
                    })
                    .collect()
            })
            .collect();
        message.push_str(&lines.join("\n"));
    }

    message
}
