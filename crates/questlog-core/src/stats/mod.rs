//! Derived statistics for the dashboard.
//!
//! Everything here is a pure function of the current habit and task lists
//! plus the user's experience record. Nothing is cached or persisted; the
//! caller recomputes on every read.

mod dashboard;
mod streaks;

pub use dashboard::{
    completed_habit_count, completed_task_count, completion_rate, pending_task_count,
    raw_xp_progress, task_breakdown, xp_progress_ratio, DashboardStats, TaskBreakdown,
};
pub use streaks::{streak_series, total_streak, StreakPoint};
