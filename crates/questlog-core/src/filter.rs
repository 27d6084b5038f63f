//! Task list filtering and search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::model::Task;

/// Which completion states to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        })
    }
}

impl FromStr for TaskFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "pending" => Ok(TaskFilter::Pending),
            "completed" | "done" => Ok(TaskFilter::Completed),
            other => Err(ValidationError::InvalidValue {
                field: "filter".into(),
                message: format!("expected all, pending or completed, got '{other}'"),
            }),
        }
    }
}

/// Case-insensitive substring match against the title or any tag.
/// An empty query matches every task.
pub fn matches_search(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

/// Tasks matching both `filter` and `query`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: TaskFilter, query: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task) && matches_search(task, query))
        .collect()
}
