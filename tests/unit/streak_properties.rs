/// Property tests for the streak engine
use chrono::{Duration, NaiveDate};
use dayone::*;
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Completion sets drawn from a 120-day range starting at 2024-01-01
fn completions() -> impl Strategy<Value = CompletionSet> {
    prop::collection::vec(0i64..120, 0..60)
        .prop_map(|offsets| offsets.into_iter().map(|o| base() + Duration::days(o)).collect())
}

fn any_day() -> impl Strategy<Value = NaiveDate> {
    (-10i64..140).prop_map(|o| base() + Duration::days(o))
}

proptest! {
    #[test]
    fn test_longest_never_below_current(set in completions(), reference in any_day()) {
        let result = compute_streaks(&set, reference);
        prop_assert!(result.longest_streak >= result.current_streak);
    }

    #[test]
    fn test_total_is_set_size(set in completions(), reference in any_day()) {
        let result = compute_streaks(&set, reference);
        prop_assert_eq!(result.total_completions as usize, set.len());
        prop_assert_eq!(result.last_completion, set.last());
    }

    #[test]
    fn test_repeated_calls_agree(set in completions(), reference in any_day()) {
        prop_assert_eq!(compute_streaks(&set, reference), compute_streaks(&set, reference));
    }

    #[test]
    fn test_current_streak_days_are_all_present(set in completions(), reference in any_day()) {
        let result = compute_streaks(&set, reference);
        if result.current_streak > 0 {
            let end = if set.contains(reference) { reference } else { reference - Duration::days(1) };
            for back in 0..i64::from(result.current_streak) {
                prop_assert!(set.contains(end - Duration::days(back)));
            }
            prop_assert!(!set.contains(end - Duration::days(i64::from(result.current_streak))));
        }
    }

    #[test]
    fn test_rate_is_a_percentage(set in completions(), start in any_day(), len in 0i64..60) {
        let rate = compute_window_rate(&set, start, start + Duration::days(len));
        prop_assert!(rate.rate <= 100);
        prop_assert!(rate.completed <= rate.total);
        prop_assert_eq!(rate.total as i64, len + 1);
    }

    #[test]
    fn test_completed_grows_with_the_window(set in completions(), start in any_day(), len in 0i64..60) {
        let shorter = compute_window_rate(&set, start, start + Duration::days(len));
        let longer = compute_window_rate(&set, start, start + Duration::days(len + 1));
        prop_assert!(longer.completed >= shorter.completed);
        prop_assert!(longer.total > shorter.total);
    }

    #[test]
    fn test_fully_completed_window_is_full(start in any_day(), len in 0i64..60) {
        let set: CompletionSet = (0..=len).map(|o| start + Duration::days(o)).collect();
        let rate = compute_window_rate(&set, start, start + Duration::days(len));
        prop_assert_eq!(rate.rate, 100);

        let result = compute_streaks(&set, start + Duration::days(len));
        prop_assert_eq!(result.current_streak as i64, len + 1);
        prop_assert_eq!(result.longest_streak as i64, len + 1);
    }
}

#[test]
fn test_empty_set_for_any_reference_day() {
    for offset in -5..5 {
        let result = compute_streaks(&CompletionSet::new(), base() + Duration::days(offset));
        assert_eq!(result, StreakResult::default());
    }
}
