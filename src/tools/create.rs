/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::Frequency;
use crate::{AppError, Command, DayOneApp};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// How often: daily, weekly or custom (defaults to daily)
    #[serde(default)]
    pub frequency: Option<String>,
    /// For custom frequency: repeat every N days
    #[serde(default)]
    pub custom_frequency: Option<u32>,
    /// Optional accent colour
    #[serde(default)]
    pub color: Option<String>,
    /// Optional icon name
    #[serde(default)]
    pub icon: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Create a new habit
///
/// A blank name creates nothing and reports so instead of failing.
pub fn create_habit(app: &mut DayOneApp, params: CreateHabitParams) -> Result<CreateHabitResponse, AppError> {
    let frequency = match params.frequency.as_deref() {
        Some(name) if !name.trim().is_empty() => Frequency::parse(name, params.custom_frequency)?,
        _ => Frequency::Daily,
    };

    let before = app.state().habits.len();
    let state = app.dispatch(Command::AddHabit {
        name: params.name.clone(),
        description: params.description.unwrap_or_default(),
        frequency,
        color: params.color,
        icon: params.icon,
    })?;

    if state.habits.len() == before {
        return Ok(CreateHabitResponse {
            success: false,
            habit_id: None,
            message: "Nothing to create: the habit name is empty.".to_string(),
        });
    }

    // New habits are appended
    let habit = &state.habits[state.habits.len() - 1];
    tracing::info!("Created habit {} ({})", habit.name, habit.id);

    Ok(CreateHabitResponse {
        success: true,
        habit_id: Some(habit.id.to_string()),
        message: format!(
            "✅ Created habit '{}' ({})! Ready to start your streak!",
            habit.name, habit.frequency
        ),
    })
}
