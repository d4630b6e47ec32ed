/// Tool for lifetime statistics and insights
///
/// This module implements the overall_stats MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::OverallOverview;
use crate::domain::plural;
use crate::{AppError, DayOneApp};

/// Parameters for the overall statistics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OverallParams {
    /// Include generated insights (defaults to true)
    #[serde(default)]
    pub include_insights: Option<bool>,
}

/// Response from the overall statistics
#[derive(Debug, Serialize)]
pub struct OverallResponse {
    pub overview: OverallOverview,
    pub insights: Vec<String>,
    pub message: String,
}

/// Lifetime totals, best streaks and insights across all habits
///
/// Streaks are measured against today, not the selected day.
pub fn overall_stats(app: &DayOneApp, params: OverallParams) -> Result<OverallResponse, AppError> {
    let state = app.state();
    let today = app.today();
    let overview = app.analytics().overall_overview(&state.habits, today);

    let insights = if params.include_insights.unwrap_or(true) {
        app.analytics().generate_insights(&state.habits, &state.journal_entries, today)
    } else {
        Vec::new()
    };

    let mut message = format!(
        "📈 {} habit{}, {} total completion{}\n🔥 Best current streak: {} day{}\n🏆 Longest streak: {} day{}",
        overview.total_habits,
        plural(overview.total_habits),
        overview.total_completions,
        plural(overview.total_completions),
        overview.best_current_streak,
        plural(overview.best_current_streak),
        overview.longest_streak,
        plural(overview.longest_streak),
    );

    for habit in &overview.habits {
        message.push_str(&format!("\n\n{}: {}", habit.name, habit.streak.motivational_message()));
    }

    if !insights.is_empty() {
        message.push_str("\n\n💡 Insights:");
        for insight in &insights {
            message.push_str(&format!("\n• {}", insight));
        }
    }

    Ok(OverallResponse { overview, insights, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_day, Frequency};
    use crate::tools::test_app;
    use crate::Command;

    #[test]
    fn test_overall_stats() {
        let mut app = test_app();
        for name in ["Read", "Run"] {
            app.dispatch(Command::AddHabit {
                name: name.to_string(),
                description: String::new(),
                frequency: Frequency::Daily,
                color: None,
                icon: None,
            }).unwrap();
        }
        let read = app.state().habits[0].id.clone();
        for day in ["2023-12-25", "2023-12-26", "2023-12-27", "2024-01-02", "2024-01-03"] {
            app.dispatch(Command::SetCompletion {
                habit_id: read.clone(),
                day: parse_day(day).unwrap(),
                completed: true,
            }).unwrap();
        }

        let response = overall_stats(&app, OverallParams { include_insights: None }).unwrap();

        assert_eq!(response.overview.total_habits, 2);
        assert_eq!(response.overview.total_completions, 5);
        assert_eq!(response.overview.best_current_streak, 2);
        assert_eq!(response.overview.longest_streak, 3);
        assert!(!response.insights.is_empty());
        assert!(response.message.contains("Longest streak: 3 days"));
    }

    #[test]
    fn test_overall_stats_without_insights() {
        let app = test_app();
        let response = overall_stats(&app, OverallParams { include_insights: Some(false) }).unwrap();

        assert_eq!(response.overview.total_habits, 0);
        assert!(response.insights.is_empty());
        assert!(!response.message.contains("Insights"));
    }
}
