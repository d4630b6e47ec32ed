/// Saved state survives closing and reopening the database
use chrono::NaiveDate;
use dayone::*;
use tempfile::tempdir;

fn day(s: &str) -> NaiveDate {
    parse_day(s).expect("valid day")
}

fn config(path: std::path::PathBuf, today: &str) -> AppConfig {
    AppConfig::new(path).with_reference_day(Some(day(today)))
}

#[test]
fn test_state_survives_restart() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("dayone.db");

    {
        let mut app = DayOneApp::new(config(db_path.clone(), "2024-01-03")).expect("Failed to open app");
        app.dispatch(Command::AddHabit {
            name: "Walk".to_string(),
            description: "Around the block".to_string(),
            frequency: Frequency::Custom(3),
            color: Some("#22c55e".to_string()),
            icon: Some("footprints".to_string()),
        }).unwrap();
        let id = app.state().habits[0].id.clone();
        for d in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            app.dispatch(Command::ToggleCompletion { habit_id: id.clone(), day: day(d) }).unwrap();
        }
        app.dispatch(Command::SaveJournalEntry {
            day: day("2024-01-03"),
            content: "Three in a row".to_string(),
            mood: Some(5),
            tags: Some(vec!["walking".to_string()]),
            habit_ids: vec![id],
        }).unwrap();
        app.dispatch(Command::SetDarkMode { enabled: true }).unwrap();
    }

    let app = DayOneApp::new(config(db_path, "2024-01-04")).expect("Failed to reopen app");
    let state = app.state();

    assert_eq!(state.habits.len(), 1);
    let habit = &state.habits[0];
    assert_eq!(habit.name, "Walk");
    assert_eq!(habit.frequency, Frequency::Custom(3));
    assert_eq!(habit.icon.as_deref(), Some("footprints"));
    assert_eq!(habit.streak(app.today()).current_streak, 3);

    let entry = state.journal_entry_for(day("2024-01-03")).expect("entry was saved");
    assert_eq!(entry.mood, Some(5));
    assert_eq!(entry.habit_ids, vec![habit.id.clone()]);

    assert!(state.dark_mode);
    // Reopening always lands on today
    assert_eq!(state.selected_date, day("2024-01-04"));
}

#[test]
fn test_store_over_sqlite_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("store.db");

    let storage = SqliteStorage::new(&db_path).expect("Failed to create storage");
    let mut store = StateStore::open(storage, day("2024-01-03")).unwrap();
    store.dispatch(Command::AddHabit {
        name: "Stretch".to_string(),
        description: String::new(),
        frequency: Frequency::Daily,
        color: None,
        icon: None,
    }).unwrap();
    let id = store.state().habits[0].id.clone();
    store.dispatch(Command::DeleteHabit { habit_id: id }).unwrap();

    let reopened = SqliteStorage::new(&db_path).expect("Failed to reopen storage");
    let loaded = reopened.load_state().unwrap().expect("state was saved");
    assert!(loaded.habits.is_empty());
}

#[test]
fn test_fresh_database_has_no_state() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let storage = SqliteStorage::new(temp_dir.path().join("empty.db")).expect("Failed to create storage");

    assert!(storage.load_state().unwrap().is_none());
}
