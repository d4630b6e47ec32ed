/// Reducer behaviour through the public command API
use chrono::{NaiveDate, TimeZone, Utc};
use dayone::*;

fn day(s: &str) -> NaiveDate {
    parse_day(s).expect("valid day")
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap()
}

fn add(name: &str) -> Command {
    Command::AddHabit {
        name: name.to_string(),
        description: String::new(),
        frequency: Frequency::Daily,
        color: None,
        icon: None,
    }
}

#[test]
fn test_toggle_builds_a_streak() {
    let mut state = reduce(&AppState::new(day("2024-01-03")), add("Read"), now()).unwrap();
    let id = state.habits[0].id.clone();

    for d in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        state = reduce(&state, Command::ToggleCompletion { habit_id: id.clone(), day: day(d) }, now()).unwrap();
    }

    let streak = state.habits[0].streak(day("2024-01-03"));
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.longest_streak, 3);
}

#[test]
fn test_set_completion_is_idempotent() {
    let state = reduce(&AppState::new(day("2024-01-03")), add("Read"), now()).unwrap();
    let mark = Command::SetCompletion {
        habit_id: state.habits[0].id.clone(),
        day: day("2024-01-03"),
        completed: true,
    };

    let once = reduce(&state, mark.clone(), now()).unwrap();
    let twice = reduce(&once, mark, now()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.habits[0].completions.len(), 1);
}

#[test]
fn test_unknown_habit_is_an_error() {
    let state = AppState::new(day("2024-01-03"));
    let result = reduce(&state, Command::ToggleCompletion { habit_id: HabitId::new(), day: day("2024-01-03") }, now());

    assert!(matches!(result, Err(DomainError::HabitNotFound(_))));
}

#[test]
fn test_journal_entry_is_upserted_per_day() {
    let state = AppState::new(day("2024-01-03"));
    let save = |content: &str| Command::SaveJournalEntry {
        day: day("2024-01-03"),
        content: content.to_string(),
        mood: None,
        tags: None,
        habit_ids: Vec::new(),
    };

    let first = reduce(&state, save("Morning pages"), now()).unwrap();
    let second = reduce(&first, save("Evening pages"), now()).unwrap();

    assert_eq!(second.journal_entries.len(), 1);
    assert_eq!(second.journal_entries[0].content, "Evening pages");
    assert_eq!(second.journal_entries[0].id, first.journal_entries[0].id);

    let blank = reduce(&second, save("  "), now()).unwrap();
    assert_eq!(blank, second);
}

#[test]
fn test_settings_commands() {
    let state = AppState::new(day("2024-01-03"));
    let state = reduce(&state, Command::SetView { view: ViewMode::Overall }, now()).unwrap();
    let state = reduce(&state, Command::SetDarkMode { enabled: true }, now()).unwrap();
    let state = reduce(&state, Command::SelectDate { day: day("2023-12-25") }, now()).unwrap();

    assert_eq!(state.current_view, ViewMode::Overall);
    assert!(state.dark_mode);
    assert_eq!(state.selected_date, day("2023-12-25"));
}
