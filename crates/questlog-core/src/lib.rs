//! # Questlog Core Library
//!
//! This library provides the core logic for Questlog, a habit and task
//! tracker that rewards completions with experience points and levels.
//! All operations are available through the `questlog` CLI, which is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Gamification**: experience awards per difficulty/priority and a level
//!   recomputed from total experience
//! - **Store**: habits, tasks and experience, loaded once and saved slot by
//!   slot after every mutation
//! - **Stats**: dashboard figures derived on every read
//! - **Storage**: SQLite key-value slots and TOML configuration
//! - **Assistant**: text-generation requests with fixed fallbacks
//!
//! ## Key Components
//!
//! - [`Store`]: application state and the mutation surface
//! - [`Database`]: persistence substrate
//! - [`Config`]: application configuration management
//! - [`Coach`]: motivational copy, subtask suggestions and tips

pub mod assistant;
pub mod error;
pub mod filter;
pub mod gamification;
pub mod model;
pub mod stats;
pub mod storage;
pub mod store;

pub use assistant::{Coach, GeminiClient, MotivationInput, RequestGate, TextGenerator, TipTopic};
pub use error::{AssistantError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use filter::{filter_tasks, TaskFilter};
pub use gamification::{award_experience, experience_for_habit, experience_for_task, level_for_xp, Toggled};
pub use model::{Difficulty, Habit, HabitCategory, Priority, Task, UserStats};
pub use stats::DashboardStats;
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use store::Store;
