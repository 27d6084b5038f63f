//! Habit commands for CLI.

use clap::Subcommand;
use questlog_core::{Difficulty, HabitCategory};
use serde_json::json;

use super::{open_store, today};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Track a new habit
    Add {
        /// Habit title
        title: String,
        /// health, learning, productivity or mindfulness
        #[arg(long, default_value = "productivity")]
        category: HabitCategory,
        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        /// Goal description, e.g. "30 mins"
        #[arg(long, default_value = "")]
        target: String,
    },
    /// List habits
    List,
    /// Mark a habit done for today, or undo it
    Toggle {
        /// Habit ID
        id: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        HabitAction::Add {
            title,
            category,
            difficulty,
            target,
        } => match store.add_habit(&title, category, difficulty, &target)? {
            Some(habit) => {
                println!("Habit created: {}", habit.id);
                println!("{}", serde_json::to_string_pretty(habit)?);
            }
            None => println!("Nothing added: title is empty"),
        },
        HabitAction::List => {
            println!("{}", serde_json::to_string_pretty(store.habits())?);
        }
        HabitAction::Toggle { id } => match store.toggle_habit(&id, today())? {
            Some(toggled) => {
                let out = json!({
                    "habit": toggled.item,
                    "award": toggled.award,
                    "stats": store.user_stats(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            None => println!("Habit not found: {id}"),
        },
        HabitAction::Delete { id } => {
            if store.delete_habit(&id)? {
                println!("Habit deleted: {id}");
            } else {
                println!("Habit not found: {id}");
            }
        }
    }
    Ok(())
}
