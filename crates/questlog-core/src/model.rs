//! Habits, tasks and the user's experience record.
//!
//! Snapshots are stored as JSON with camelCase field names and lowercase
//! enum values, so `completed_today` persists as `"completedToday"`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Life area a habit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Learning,
    Productivity,
    Mindfulness,
}

/// How demanding a habit is. Drives the experience award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Task urgency. Drives the experience award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// A recurring habit with a consecutive-day streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub streak: u32,
    pub completed_today: bool,
    pub category: HabitCategory,
    pub difficulty: Difficulty,
    /// Free-text goal, e.g. "30 mins" or "1 chapter".
    #[serde(default)]
    pub target: String,
    /// Day of the most recent completion. Absent in older snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<NaiveDate>,
}

/// A one-off task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Accumulated experience.
///
/// `xp` and `points` grow in lockstep today; they are kept separate so
/// points can later become spendable without touching the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub xp: u64,
    pub level: u32,
    pub points: u64,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            points: 0,
        }
    }
}

impl Habit {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: HabitCategory,
        difficulty: Difficulty,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            streak: 0,
            completed_today: false,
            category,
            difficulty,
            target: target.into(),
            last_completed: None,
        }
    }
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            priority,
            due_date: None,
            tags: Vec::new(),
        }
    }
}

macro_rules! lowercase_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(ValidationError::InvalidValue {
                        field: $field.into(),
                        message: format!("unknown value '{other}'"),
                    }),
                }
            }
        }
    };
}

lowercase_enum!(HabitCategory, "category", {
    Health => "health",
    Learning => "learning",
    Productivity => "productivity",
    Mindfulness => "mindfulness",
});

lowercase_enum!(Difficulty, "difficulty", {
    Easy => "easy",
    Medium => "medium",
    Hard => "hard",
});

lowercase_enum!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});
