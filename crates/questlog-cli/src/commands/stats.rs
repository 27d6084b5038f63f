use clap::Subcommand;
use questlog_core::gamification::xp_for_level;
use questlog_core::stats::{raw_xp_progress, streak_series, task_breakdown};
use serde_json::json;

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Headline dashboard figures
    Dashboard,
    /// Streak per habit
    Streaks,
    /// Experience, level and progress toward the next level
    Level,
    /// Completed vs pending tasks
    Tasks,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;

    match action {
        StatsAction::Dashboard => {
            println!("{}", serde_json::to_string_pretty(&store.dashboard())?);
        }
        StatsAction::Streaks => {
            let series = streak_series(store.habits());
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        StatsAction::Level => {
            let stats = store.user_stats();
            let out = json!({
                "xp": stats.xp,
                "level": stats.level,
                "points": stats.points,
                "next_level_xp": xp_for_level(stats.level.saturating_add(1)),
                "progress": store.dashboard().xp_progress,
                "raw_progress": raw_xp_progress(stats),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Tasks => {
            println!("{}", serde_json::to_string_pretty(&task_breakdown(store.tasks()))?);
        }
    }
    Ok(())
}
