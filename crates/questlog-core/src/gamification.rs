//! Experience awards, levels, and the completion toggles that drive them.
//!
//! The level is always recomputed from total experience:
//! `level = floor(sqrt(xp / 100)) + 1`. It is never stepped incrementally,
//! so `level` stays a pure function of `xp` no matter how awards are split.
//!
//! Awards only flow one way. Undoing a completion restores the habit or
//! task but keeps any experience already granted.

use chrono::NaiveDate;

use crate::model::{Difficulty, Habit, Priority, Task, UserStats};

/// Experience per level step before the square root is applied.
pub const XP_PER_LEVEL_UNIT: u64 = 100;

/// Result of toggling a habit or task: the new item and the experience
/// it earned (zero for an undo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled<T> {
    pub item: T,
    pub award: u64,
}

impl<T> Toggled<T> {
    /// Whether the toggle was a completion rather than an undo.
    pub fn is_completion(&self) -> bool {
        self.award > 0
    }
}

/// Level for a total experience value.
///
/// `floor(sqrt(xp / 100))` equals `floor(isqrt(xp) / 10)`, which avoids
/// float rounding at perfect-square boundaries.
pub fn level_for_xp(xp: u64) -> u32 {
    let steps = isqrt(xp) / 10;
    u32::try_from(steps).unwrap_or(u32::MAX - 1) + 1
}

/// Total experience needed to reach `level`.
pub fn xp_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps.saturating_mul(steps).saturating_mul(XP_PER_LEVEL_UNIT)
}

/// Add `amount` to both xp and points and recompute the level.
pub fn award_experience(stats: &UserStats, amount: u64) -> UserStats {
    let xp = stats.xp.saturating_add(amount);
    UserStats {
        xp,
        level: level_for_xp(xp),
        points: stats.points.saturating_add(amount),
    }
}

pub fn experience_for_habit(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 20,
        Difficulty::Medium => 50,
        Difficulty::Hard => 100,
    }
}

pub fn experience_for_task(priority: Priority) -> u64 {
    match priority {
        Priority::Low => 10,
        Priority::Medium => 30,
        Priority::High => 50,
        Priority::Critical => 100,
    }
}

/// Complete or un-complete a habit for `today`.
///
/// Completing extends the streak and earns experience. Undoing shortens
/// the streak (never below zero) and earns nothing. After an undo the
/// last completion moves back to yesterday if a streak remains, since a
/// positive streak means yesterday was completed.
pub fn toggle_habit(habit: &Habit, today: NaiveDate) -> Toggled<Habit> {
    let mut item = habit.clone();
    if habit.completed_today {
        item.completed_today = false;
        item.streak = habit.streak.saturating_sub(1);
        item.last_completed = if item.streak > 0 { today.pred_opt() } else { None };
        Toggled { item, award: 0 }
    } else {
        item.completed_today = true;
        item.streak = habit.streak.saturating_add(1);
        item.last_completed = Some(today);
        Toggled {
            item,
            award: experience_for_habit(habit.difficulty),
        }
    }
}

/// Complete or un-complete a task.
pub fn toggle_task(task: &Task) -> Toggled<Task> {
    let mut item = task.clone();
    item.completed = !task.completed;
    let award = if item.completed {
        experience_for_task(task.priority)
    } else {
        0
    };
    Toggled { item, award }
}

fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HabitCategory;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(399), 2);
        assert_eq!(level_for_xp(400), 3);
        assert_eq!(level_for_xp(900), 4);
        assert_eq!(level_for_xp(u64::MAX), 429_496_730);
    }

    #[test]
    fn xp_for_level_inverts_level_for_xp() {
        for level in 1..50 {
            let xp = xp_for_level(level);
            assert_eq!(level_for_xp(xp), level);
            if xp > 0 {
                assert_eq!(level_for_xp(xp - 1), level - 1);
            }
        }
    }

    #[test]
    fn award_moves_xp_points_and_level_together() {
        let stats = award_experience(&UserStats::default(), 150);
        assert_eq!(stats, UserStats { xp: 150, level: 2, points: 150 });
        let stats = award_experience(&stats, 250);
        assert_eq!(stats, UserStats { xp: 400, level: 3, points: 400 });
    }

    #[test]
    fn award_recomputes_stale_level() {
        let stale = UserStats { xp: 500, level: 1, points: 500 };
        assert_eq!(award_experience(&stale, 0).level, 3);
    }

    #[test]
    fn award_tables() {
        assert_eq!(experience_for_habit(Difficulty::Easy), 20);
        assert_eq!(experience_for_habit(Difficulty::Medium), 50);
        assert_eq!(experience_for_habit(Difficulty::Hard), 100);
        assert_eq!(experience_for_task(Priority::Low), 10);
        assert_eq!(experience_for_task(Priority::Medium), 30);
        assert_eq!(experience_for_task(Priority::High), 50);
        assert_eq!(experience_for_task(Priority::Critical), 100);
    }

    #[test]
    fn habit_complete_then_undo_restores_habit_but_keeps_xp() {
        let today = day(2026, 3, 10);
        let mut habit = Habit::new("h", "Run", HabitCategory::Health, Difficulty::Hard, "5k");
        habit.streak = 3;
        habit.last_completed = Some(day(2026, 3, 9));

        let done = toggle_habit(&habit, today);
        assert!(done.is_completion());
        assert_eq!(done.award, 100);
        assert_eq!(done.item.streak, 4);
        assert_eq!(done.item.last_completed, Some(today));
        let stats = award_experience(&UserStats::default(), done.award);

        let undone = toggle_habit(&done.item, today);
        assert_eq!(undone.award, 0);
        assert_eq!(undone.item, habit);
        assert_eq!(award_experience(&stats, undone.award).xp, 100);
    }

    #[test]
    fn habit_undo_never_goes_below_zero() {
        let mut habit = Habit::new("h", "Run", HabitCategory::Health, Difficulty::Easy, "");
        habit.completed_today = true;
        let undone = toggle_habit(&habit, day(2026, 1, 1));
        assert_eq!(undone.item.streak, 0);
        assert_eq!(undone.item.last_completed, None);
    }

    #[test]
    fn task_toggle_round_trip() {
        let task = Task::new("t", "Write report", Priority::High);
        let done = toggle_task(&task);
        assert!(done.item.completed);
        assert_eq!(done.award, 50);
        let undone = toggle_task(&done.item);
        assert_eq!(undone.item, task);
        assert_eq!(undone.award, 0);
    }
}
