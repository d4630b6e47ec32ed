/// A week of use, checked through the analytics views
use chrono::NaiveDate;
use dayone::*;
use tempfile::NamedTempFile;

fn day(s: &str) -> NaiveDate {
    parse_day(s).expect("valid day")
}

fn add(app: &mut DayOneApp, name: &str) -> HabitId {
    let state = app.dispatch(Command::AddHabit {
        name: name.to_string(),
        description: String::new(),
        frequency: Frequency::Daily,
        color: None,
        icon: None,
    }).unwrap();
    state.habits.last().unwrap().id.clone()
}

#[test]
fn test_week_of_habits() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let config = AppConfig::new(temp_file.path().to_path_buf()).with_reference_day(Some(day("2024-01-06")));
    let mut app = DayOneApp::new(config).expect("Failed to open app");

    let read = add(&mut app, "Read");
    let run = add(&mut app, "Run");

    // Read every day Sunday to Saturday, run on three of them
    for d in ["2023-12-31", "2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06"] {
        app.dispatch(Command::SetCompletion { habit_id: read.clone(), day: day(d), completed: true }).unwrap();
    }
    for d in ["2024-01-01", "2024-01-03", "2024-01-05"] {
        app.dispatch(Command::SetCompletion { habit_id: run.clone(), day: day(d), completed: true }).unwrap();
    }

    let analytics = app.analytics();
    let state = app.state();

    let today = analytics.today_summary(&state.habits, app.today());
    assert_eq!((today.completed, today.total, today.rate), (1, 2, 50));

    let week = analytics.weekly_overview(&state.habits, day("2024-01-03"));
    assert_eq!(week.week_start, day("2023-12-31"));
    assert_eq!(week.habits[0].week.rate, 100);
    assert_eq!(week.habits[1].week.rate, 43);
    assert_eq!(week.total_completions, 10);
    assert_eq!(week.average_rate, 72);

    let overall = analytics.overall_overview(&state.habits, app.today());
    assert_eq!(overall.best_current_streak, 7);
    assert_eq!(overall.longest_streak, 7);
    assert_eq!(overall.habits[1].streak.current_streak, 1);

    let grid = analytics.streak_grid(&state.habits[1].completions, app.today(), 7);
    let marks: Vec<bool> = grid.concat().iter().map(|cell| cell.completed).collect();
    assert_eq!(marks, vec![false, true, false, true, false, true, false]);
}

#[test]
fn test_deleting_a_habit_unlinks_journal_entries() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let config = AppConfig::new(temp_file.path().to_path_buf()).with_reference_day(Some(day("2024-01-03")));
    let mut app = DayOneApp::new(config).expect("Failed to open app");

    let read = add(&mut app, "Read");
    app.dispatch(Command::SaveJournalEntry {
        day: day("2024-01-03"),
        content: "Finished the book".to_string(),
        mood: None,
        tags: None,
        habit_ids: vec![read.clone()],
    }).unwrap();
    app.dispatch(Command::DeleteHabit { habit_id: read }).unwrap();

    let entry = app.state().journal_entry_for(day("2024-01-03")).unwrap();
    assert!(entry.habit_ids.is_empty());
    assert_eq!(entry.content, "Finished the book");
}
