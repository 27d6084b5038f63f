//! Per-habit streak series.

use serde::{Deserialize, Serialize};

use crate::model::Habit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPoint {
    pub id: String,
    pub title: String,
    pub streak: u32,
}

/// One point per habit, in list order.
pub fn streak_series(habits: &[Habit]) -> Vec<StreakPoint> {
    habits
        .iter()
        .map(|h| StreakPoint {
            id: h.id.clone(),
            title: h.title.clone(),
            streak: h.streak,
        })
        .collect()
}

pub fn total_streak(habits: &[Habit]) -> u64 {
    habits.iter().map(|h| u64::from(h.streak)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, HabitCategory};

    #[test]
    fn series_preserves_order() {
        let mut a = Habit::new("a", "Walk", HabitCategory::Health, Difficulty::Easy, "");
        a.streak = 2;
        let b = Habit::new("b", "Journal", HabitCategory::Mindfulness, Difficulty::Easy, "");
        let series = streak_series(&[a, b]);
        assert_eq!(
            series.iter().map(|p| (p.title.as_str(), p.streak)).collect::<Vec<_>>(),
            vec![("Walk", 2), ("Journal", 0)]
        );
    }

    #[test]
    fn empty_total_is_zero() {
        assert_eq!(total_streak(&[]), 0);
    }
}
