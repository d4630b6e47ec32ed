/// Tool for view settings
///
/// This module implements the app_settings MCP tool, which selects the day
/// and view the other tools default to and toggles dark mode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{format_day, parse_day, ViewMode};
use crate::{AppError, Command, DayOneApp};

/// Parameters for changing settings; omitted fields stay as they are
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SettingsParams {
    /// Day the other tools default to (YYYY-MM-DD)
    #[serde(default)]
    pub selected_date: Option<String>,
    /// Current view: today, weekly or overall
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub selected_date: String,
    pub view: String,
    pub dark_mode: bool,
    pub message: String,
}

pub fn update_settings(app: &mut DayOneApp, params: SettingsParams) -> Result<SettingsResponse, AppError> {
    let mut commands = Vec::new();

    if let Some(raw) = params.selected_date.as_deref().filter(|raw| !raw.trim().is_empty()) {
        let day = parse_day(raw).map_err(|e| AppError::InvalidParams(e.to_string()))?;
        commands.push(Command::SelectDate { day });
    }
    if let Some(raw) = params.view.as_deref().filter(|raw| !raw.trim().is_empty()) {
        commands.push(Command::SetView { view: ViewMode::parse(raw)? });
    }
    if let Some(enabled) = params.dark_mode {
        commands.push(Command::SetDarkMode { enabled });
    }

    let changed = !commands.is_empty();
    for command in commands {
        app.dispatch(command)?;
    }

    let state = app.state();
    let summary = format!(
        "day {}, {} view, dark mode {}",
        format_day(state.selected_date),
        state.current_view.name(),
        if state.dark_mode { "on" } else { "off" }
    );

    Ok(SettingsResponse {
        selected_date: format_day(state.selected_date),
        view: state.current_view.name().to_string(),
        dark_mode: state.dark_mode,
        message: if changed {
            format!("⚙️ Settings updated: {}", summary)
        } else {
            format!("⚙️ Current settings: {}", summary)
        },
    })
}
