//! Property tests for the experience and level rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use questlog_core::gamification::{award_experience, level_for_xp, toggle_habit, toggle_task};
use questlog_core::{Difficulty, Habit, HabitCategory, Priority, Task, UserStats};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Critical),
    ]
}

fn stats_from(xp: u64) -> UserStats {
    UserStats {
        xp,
        level: level_for_xp(xp),
        points: xp,
    }
}

proptest! {
    #[test]
    fn level_is_at_least_one_and_monotonic(a in 0u64..10_000_000_000, b in 0u64..10_000_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for_xp(lo) >= 1);
        prop_assert!(level_for_xp(lo) <= level_for_xp(hi));
    }

    #[test]
    fn level_matches_float_formula(xp in 0u64..1_000_000_000) {
        let expected = ((xp as f64 / 100.0).sqrt().floor() as u32) + 1;
        prop_assert_eq!(level_for_xp(xp), expected);
    }

    #[test]
    fn awards_are_associative(start in 0u64..1_000_000, a in 0u64..10_000, b in 0u64..10_000) {
        let stats = stats_from(start);
        let split = award_experience(&award_experience(&stats, a), b);
        let joined = award_experience(&stats, a + b);
        prop_assert_eq!(split, joined);
    }

    #[test]
    fn habit_round_trip_restores_state_and_keeps_xp(
        streak in 0u32..1000,
        done in any::<bool>(),
        difficulty in difficulty(),
        offset in 0i64..3650,
    ) {
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset);
        let mut habit = Habit::new("h", "Habit", HabitCategory::Productivity, difficulty, "");
        habit.streak = if done { streak.max(1) } else { streak };
        habit.completed_today = done;
        if done {
            habit.last_completed = Some(today);
        } else if habit.streak > 0 {
            habit.last_completed = today.pred_opt();
        }

        let first = toggle_habit(&habit, today);
        let second = toggle_habit(&first.item, today);
        prop_assert_eq!(&second.item, &habit);

        let start = UserStats::default();
        let after = award_experience(&award_experience(&start, first.award), second.award);
        prop_assert!(after.xp > start.xp);
    }

    #[test]
    fn task_round_trip_restores_state_and_keeps_xp(done in any::<bool>(), priority in priority()) {
        let mut task = Task::new("t", "Task", priority);
        task.completed = done;
        let first = toggle_task(&task);
        let second = toggle_task(&first.item);
        prop_assert_eq!(&second.item, &task);
        prop_assert!(first.award + second.award > 0);
    }
}
