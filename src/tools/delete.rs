/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool. Deleting a habit drops
/// its completion history too.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::find_habit;
use crate::{AppError, Command, DayOneApp};

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID or name of the habit
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub message: String,
}

pub fn delete_habit(app: &mut DayOneApp, params: DeleteHabitParams) -> Result<DeleteHabitResponse, AppError> {
    let habit = find_habit(app.state(), &params.habit_id)?;
    let habit_id = habit.id.clone();
    let name = habit.name.clone();
    let completions = habit.completions.len();

    app.dispatch(Command::DeleteHabit { habit_id })?;

    Ok(DeleteHabitResponse {
        success: true,
        message: format!("🗑️ Deleted habit '{}' and its {} completion(s)", name, completions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Frequency;
    use crate::tools::test_app;

    #[test]
    fn test_delete_habit() {
        let mut app = test_app();
        app.dispatch(Command::AddHabit {
            name: "Floss".to_string(),
            description: String::new(),
            frequency: Frequency::Daily,
            color: None,
            icon: None,
        }).unwrap();
        let id = app.state().habits[0].id.to_string();

        let response = delete_habit(&mut app, DeleteHabitParams { habit_id: id.clone() }).unwrap();
        assert!(response.message.contains("Floss"));
        assert!(app.state().habits.is_empty());

        assert!(delete_habit(&mut app, DeleteHabitParams { habit_id: id }).is_err());
    }
}
