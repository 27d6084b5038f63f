//! Headline numbers: completion rate, counts, and level progress.

use serde::{Deserialize, Serialize};

use super::streaks::total_streak;
use crate::gamification::XP_PER_LEVEL_UNIT;
use crate::model::{Habit, Task, UserStats};

/// Snapshot of every dashboard figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Completed tasks as a rounded percentage (0-100). Zero with no tasks.
    pub completion_rate: u32,
    /// Every tracked habit counts as active; there is no archive.
    pub active_habits: usize,
    pub completed_habits: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    /// Sum of all habit streaks.
    pub total_streak: u64,
    pub xp: u64,
    pub level: u32,
    pub points: u64,
    /// `xp / (level * 100)` clamped to `[0, 1]`.
    pub xp_progress: f64,
}

/// Completed vs pending split, for the task chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBreakdown {
    pub completed: usize,
    pub pending: usize,
}

impl DashboardStats {
    pub fn compute(habits: &[Habit], tasks: &[Task], stats: &UserStats) -> Self {
        Self {
            completion_rate: completion_rate(tasks),
            active_habits: habits.len(),
            completed_habits: completed_habit_count(habits),
            pending_tasks: pending_task_count(tasks),
            completed_tasks: completed_task_count(tasks),
            total_streak: total_streak(habits),
            xp: stats.xp,
            level: stats.level,
            points: stats.points,
            xp_progress: xp_progress_ratio(stats),
        }
    }
}

/// `round(100 * completed / total)`, or 0 when there are no tasks.
pub fn completion_rate(tasks: &[Task]) -> u32 {
    let total = tasks.len() as u64;
    if total == 0 {
        return 0;
    }
    let completed = completed_task_count(tasks) as u64;
    // Integer form of floor(x + 0.5).
    ((200 * completed + total) / (2 * total)) as u32
}

pub fn completed_habit_count(habits: &[Habit]) -> usize {
    habits.iter().filter(|h| h.completed_today).count()
}

pub fn completed_task_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

pub fn pending_task_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

pub fn task_breakdown(tasks: &[Task]) -> TaskBreakdown {
    TaskBreakdown {
        completed: completed_task_count(tasks),
        pending: pending_task_count(tasks),
    }
}

/// Unclamped `xp / (level * 100)`.
///
/// Because the level curve is quadratic and this denominator is linear,
/// the value exceeds 1.0 for most xp totals above level 2. Progress bars
/// should use [`xp_progress_ratio`].
pub fn raw_xp_progress(stats: &UserStats) -> f64 {
    let denominator = u64::from(stats.level.max(1)) * XP_PER_LEVEL_UNIT;
    stats.xp as f64 / denominator as f64
}

pub fn xp_progress_ratio(stats: &UserStats) -> f64 {
    raw_xp_progress(stats).clamp(0.0, 1.0)
}
