/// Concrete streak and window-rate scenarios
use chrono::NaiveDate;
use dayone::*;

fn day(s: &str) -> NaiveDate {
    parse_day(s).expect("valid day")
}

fn set(days: &[&str]) -> CompletionSet {
    days.iter().map(|d| day(d)).collect()
}

#[test]
fn test_three_day_run_ending_today() {
    let result = compute_streaks(&set(&["2024-01-01", "2024-01-02", "2024-01-03"]), day("2024-01-03"));

    assert_eq!(result, StreakResult {
        current_streak: 3,
        longest_streak: 3,
        total_completions: 3,
        last_completion: Some(day("2024-01-03")),
    });
}

#[test]
fn test_gap_breaks_the_run() {
    let result = compute_streaks(&set(&["2024-01-01", "2024-01-03"]), day("2024-01-03"));

    assert_eq!(result.current_streak, 1);
    assert_eq!(result.longest_streak, 1);
    assert_eq!(result.total_completions, 2);
}

#[test]
fn test_today_not_done_keeps_yesterdays_run() {
    let result = compute_streaks(&set(&["2024-01-01", "2024-01-02"]), day("2024-01-03"));

    assert_eq!(result.current_streak, 2);
    assert_eq!(result.longest_streak, 2);
    assert_eq!(result.last_completion, Some(day("2024-01-02")));
}

#[test]
fn test_two_missed_days_reset_the_streak() {
    let result = compute_streaks(&set(&["2024-01-01", "2024-01-02"]), day("2024-01-04"));

    assert_eq!(result.current_streak, 0);
    assert_eq!(result.longest_streak, 2);
}

#[test]
fn test_empty_history() {
    let result = compute_streaks(&CompletionSet::new(), day("2024-01-03"));
    assert_eq!(result, StreakResult::default());
    assert!(!result.is_active());
}

#[test]
fn test_longest_run_in_the_past() {
    let completions = set(&[
        "2023-12-01", "2023-12-02", "2023-12-03", "2023-12-04",
        "2024-01-02", "2024-01-03",
    ]);
    let result = compute_streaks(&completions, day("2024-01-03"));

    assert_eq!(result.current_streak, 2);
    assert_eq!(result.longest_streak, 4);
}

#[test]
fn test_run_across_month_and_year_boundaries() {
    let completions = set(&["2023-12-30", "2023-12-31", "2024-01-01"]);
    assert_eq!(compute_streaks(&completions, day("2024-01-01")).current_streak, 3);

    let leap = set(&["2024-02-28", "2024-02-29", "2024-03-01"]);
    assert_eq!(compute_streaks(&leap, day("2024-03-01")).longest_streak, 3);
}

#[test]
fn test_duplicates_collapse() {
    let completions = CompletionSet::parse_lenient(["2024-01-02", "2024-01-02", "2024-01-02T21:15:00Z"]);
    let result = compute_streaks(&completions, day("2024-01-02"));

    assert_eq!(result.total_completions, 1);
    assert_eq!(result.current_streak, 1);
}

#[test]
fn test_week_window_rate() {
    let rate = compute_window_rate(&set(&["2024-01-01", "2024-01-02"]), day("2024-01-01"), day("2024-01-07"));
    assert_eq!(rate, WindowRate { completed: 2, total: 7, rate: 29 });
}

#[test]
fn test_window_ignores_days_outside() {
    let completions = set(&["2023-12-31", "2024-01-03", "2024-01-08"]);
    let rate = compute_window_rate(&completions, day("2024-01-01"), day("2024-01-07"));

    assert_eq!(rate.completed, 1);
    assert_eq!(rate.rate, 14);
}

#[test]
fn test_inverted_window_is_empty() {
    let rate = compute_window_rate(&set(&["2024-01-01"]), day("2024-01-07"), day("2024-01-01"));
    assert_eq!(rate, WindowRate { completed: 0, total: 0, rate: 0 });
}

#[test]
fn test_half_rounds_up() {
    // 1 of 8 days is 12.5%
    let rate = compute_window_rate(&set(&["2024-01-01"]), day("2024-01-01"), day("2024-01-08"));
    assert_eq!(rate.rate, 13);
}

#[test]
fn test_week_starts_on_sunday() {
    // 2024-01-03 is a Wednesday
    assert_eq!(week_bounds(day("2024-01-03")), (day("2023-12-31"), day("2024-01-06")));
    assert_eq!(week_bounds(day("2023-12-31")), (day("2023-12-31"), day("2024-01-06")));
    assert_eq!(week_bounds(day("2024-01-06")), (day("2023-12-31"), day("2024-01-06")));
}
