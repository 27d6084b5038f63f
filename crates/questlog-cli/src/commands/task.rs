//! Task management commands for CLI.

use clap::Subcommand;
use questlog_core::{filter_tasks, Config, Priority, TaskFilter};
use serde_json::json;

use super::{block_on, open_coach, open_store, split_list};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// low, medium, high or critical
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date, free text (e.g. 2026-10-20)
        #[arg(long)]
        due: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List tasks
    List {
        /// all, pending or completed
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
        /// Case-insensitive match on title or tags
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Complete a task, or reopen it
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Ask the assistant to split a task into smaller steps
    Breakdown {
        /// Task ID
        id: String,
        /// Add the suggested steps as new tasks
        #[arg(long)]
        apply: bool,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;

    match action {
        TaskAction::Add {
            title,
            priority,
            due,
            tags,
        } => {
            let tags = split_list(tags.as_deref());
            match store.add_task(&title, priority, due.as_deref(), &tags)? {
                Some(task) => {
                    println!("Task created: {}", task.id);
                    println!("{}", serde_json::to_string_pretty(task)?);
                }
                None => println!("Nothing added: title is empty"),
            }
        }
        TaskAction::List { filter, search } => {
            let filtered = filter_tasks(store.tasks(), filter, &search);
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        TaskAction::Toggle { id } => match store.toggle_task(&id)? {
            Some(toggled) => {
                let out = json!({
                    "task": toggled.item,
                    "award": toggled.award,
                    "stats": store.user_stats(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            None => println!("Task not found: {id}"),
        },
        TaskAction::Delete { id } => {
            if store.delete_task(&id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Breakdown { id, apply } => {
            let Some(title) = store.task(&id).map(|t| t.title.clone()) else {
                println!("Task not found: {id}");
                return Ok(());
            };
            let coach = open_coach(&Config::load_or_default());
            let steps = block_on(coach.suggest_subtasks(&title))?;
            println!("{}", serde_json::to_string_pretty(&steps)?);
            if apply {
                let added = store.add_subtasks(&steps)?;
                println!("Added {added} subtasks");
            }
        }
    }
    Ok(())
}
