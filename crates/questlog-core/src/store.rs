//! Application state: habits, tasks and the experience record.
//!
//! A [`Store`] is owned by whoever drives the application and passed
//! around by reference; there is no global instance. It loads its three
//! slots once, keeps them in memory, and writes a slot back after every
//! mutation that changes it.
//!
//! Slots are independent. A failed or interrupted save can leave `habits`
//! and `userStats` out of step, which the store tolerates.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::gamification::{self, level_for_xp, Toggled};
use crate::model::{Difficulty, Habit, HabitCategory, Priority, Task, UserStats};
use crate::stats::DashboardStats;
use crate::storage::{HabitsConfig, KvStore};

pub const HABITS_KEY: &str = "habits";
pub const TASKS_KEY: &str = "tasks";
pub const STATS_KEY: &str = "userStats";

pub struct Store<K: KvStore> {
    kv: K,
    habits: Vec<Habit>,
    tasks: Vec<Task>,
    stats: UserStats,
    policy: HabitsConfig,
}

impl<K: KvStore> Store<K> {
    /// Load with the default rollover policy.
    pub fn load(kv: K, today: NaiveDate) -> Self {
        Self::load_with(kv, today, HabitsConfig::default())
    }

    /// Read all three slots, falling back to the seed data for any slot
    /// that is missing or unreadable, then roll habits over to `today`.
    /// Loading never fails; a rollover that cannot be saved is logged and
    /// kept in memory.
    pub fn load_with(kv: K, today: NaiveDate, policy: HabitsConfig) -> Self {
        let habits = load_slot(&kv, HABITS_KEY, seed_habits);
        let tasks = load_slot(&kv, TASKS_KEY, seed_tasks);
        let mut stats: UserStats = load_slot(&kv, STATS_KEY, UserStats::default);

        let level = level_for_xp(stats.xp);
        if stats.level != level {
            debug!(stored = stats.level, computed = level, "recomputed level from xp");
            stats.level = level;
        }

        let mut store = Self {
            kv,
            habits,
            tasks,
            stats,
            policy,
        };
        if let Err(e) = store.roll_over(today) {
            warn!(error = %e, "failed to save habit rollover");
        }
        store
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn user_stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Dashboard figures computed from the current state. Callers that keep
    /// the store open across days should [`roll_over`](Self::roll_over)
    /// first.
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(&self.habits, &self.tasks, &self.stats)
    }

    /// Apply the day boundary.
    ///
    /// A habit last completed before `today` is no longer done today. If a
    /// whole day was skipped its streak resets (unless the policy keeps
    /// streaks). Habits flagged done without a completion date are stamped
    /// with `today`; an undated streak is taken to have run through
    /// yesterday. Returns whether anything changed.
    pub fn roll_over(&mut self, today: NaiveDate) -> Result<bool> {
        let changed = self.apply_rollover(today);
        if changed {
            self.save_habits()?;
        }
        Ok(changed)
    }

    fn apply_rollover(&mut self, today: NaiveDate) -> bool {
        let yesterday = today.pred_opt();
        let mut changed = false;

        for habit in &mut self.habits {
            match habit.last_completed {
                Some(last) if last < today => {
                    if habit.completed_today {
                        habit.completed_today = false;
                        changed = true;
                    }
                    let missed_day = yesterday.is_some_and(|y| last < y);
                    if missed_day && self.policy.reset_missed_streaks && habit.streak > 0 {
                        debug!(habit = %habit.id, streak = habit.streak, "streak broken");
                        habit.streak = 0;
                        changed = true;
                    }
                }
                None if habit.completed_today => {
                    habit.last_completed = Some(today);
                    changed = true;
                }
                None if habit.streak > 0 && yesterday.is_some() => {
                    habit.last_completed = yesterday;
                    changed = true;
                }
                _ => {}
            }
        }
        changed
    }

    /// Add a habit. A blank title is ignored and nothing is saved.
    pub fn add_habit(
        &mut self,
        title: &str,
        category: HabitCategory,
        difficulty: Difficulty,
        target: &str,
    ) -> Result<Option<&Habit>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let habit = Habit::new(new_id(), title, category, difficulty, target.trim());
        self.habits.push(habit);
        self.save_habits()?;
        Ok(self.habits.last())
    }

    /// Complete or undo a habit. Unknown ids are a no-op returning `None`.
    pub fn toggle_habit(&mut self, id: &str, today: NaiveDate) -> Result<Option<Toggled<Habit>>> {
        let Some(index) = self.habits.iter().position(|h| h.id == id) else {
            return Ok(None);
        };
        // A store kept open past midnight still sees yesterday's completions.
        // Any rollover change is written with the habits slot below.
        self.apply_rollover(today);

        let toggled = gamification::toggle_habit(&self.habits[index], today);
        let awarded = self.award(toggled.award);
        self.habits[index] = toggled.item.clone();

        let stats_saved = if awarded { self.save_stats() } else { Ok(()) };
        let habits_saved = self.save_habits();
        stats_saved.and(habits_saved)?;
        Ok(Some(toggled))
    }

    /// Remove a habit. Unknown ids leave the list untouched.
    pub fn delete_habit(&mut self, id: &str) -> Result<bool> {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return Ok(false);
        }
        self.save_habits()?;
        Ok(true)
    }

    /// Add a task. A blank title is ignored and nothing is saved.
    ///
    /// Tags are trimmed and empty ones dropped; an empty due date is
    /// stored as none.
    pub fn add_task(
        &mut self,
        title: &str,
        priority: Priority,
        due_date: Option<&str>,
        tags: &[String],
    ) -> Result<Option<&Task>> {
        let Some(task) = build_task(title, priority, due_date, tags) else {
            return Ok(None);
        };
        self.tasks.push(task);
        self.save_tasks()?;
        Ok(self.tasks.last())
    }

    /// Add suggested subtasks as medium-priority tasks in one save.
    /// Returns how many were added.
    pub fn add_subtasks(&mut self, titles: &[String]) -> Result<usize> {
        let new_tasks: Vec<Task> = titles
            .iter()
            .filter_map(|title| build_task(title, Priority::Medium, None, &[]))
            .collect();
        let added = new_tasks.len();
        if added > 0 {
            self.tasks.extend(new_tasks);
            self.save_tasks()?;
        }
        Ok(added)
    }

    /// Complete or undo a task. Unknown ids are a no-op returning `None`.
    pub fn toggle_task(&mut self, id: &str) -> Result<Option<Toggled<Task>>> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let toggled = gamification::toggle_task(&self.tasks[index]);
        let awarded = self.award(toggled.award);
        self.tasks[index] = toggled.item.clone();

        let stats_saved = if awarded { self.save_stats() } else { Ok(()) };
        let tasks_saved = self.save_tasks();
        stats_saved.and(tasks_saved)?;
        Ok(Some(toggled))
    }

    /// Remove a task. Unknown ids leave the list untouched.
    pub fn delete_task(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.save_tasks()?;
        Ok(true)
    }

    fn award(&mut self, amount: u64) -> bool {
        if amount == 0 {
            return false;
        }
        let previous_level = self.stats.level;
        self.stats = gamification::award_experience(&self.stats, amount);
        info!(amount, xp = self.stats.xp, "experience awarded");
        if self.stats.level > previous_level {
            info!(level = self.stats.level, "level up");
        }
        true
    }

    fn save_habits(&mut self) -> Result<()> {
        save_slot(&mut self.kv, HABITS_KEY, &self.habits)
    }

    fn save_tasks(&mut self) -> Result<()> {
        save_slot(&mut self.kv, TASKS_KEY, &self.tasks)
    }

    fn save_stats(&mut self) -> Result<()> {
        save_slot(&mut self.kv, STATS_KEY, &self.stats)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn build_task(title: &str, priority: Priority, due_date: Option<&str>, tags: &[String]) -> Option<Task> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let mut task = Task::new(new_id(), title, priority);
    task.due_date = due_date
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    task.tags = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    Some(task)
}

fn load_slot<K, T, F>(kv: &K, key: &str, seed: F) -> T
where
    K: KvStore,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match kv.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored slot is unreadable, using seed data");
                seed()
            }
        },
        Ok(None) => {
            debug!(key, "no stored slot, using seed data");
            seed()
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read slot, using seed data");
            seed()
        }
    }
}

fn save_slot<K: KvStore, T: Serialize + ?Sized>(kv: &mut K, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw)
}

/// Habits shown on first launch.
pub fn seed_habits() -> Vec<Habit> {
    let mut meditation = Habit::new(
        "1",
        "Morning Meditation",
        HabitCategory::Mindfulness,
        Difficulty::Medium,
        "10 mins",
    );
    meditation.streak = 5;

    let mut reading = Habit::new("2", "Read 30 mins", HabitCategory::Learning, Difficulty::Easy, "30 mins");
    reading.streak = 12;
    reading.completed_today = true;

    vec![meditation, reading]
}

/// Tasks shown on first launch.
pub fn seed_tasks() -> Vec<Task> {
    let mut docs = Task::new("1", "Complete Project Documentation", Priority::High);
    docs.tags = vec!["work".into()];

    let mut review = Task::new("2", "Review Team PRs", Priority::Medium);
    review.completed = true;
    review.tags = vec!["work".into()];

    vec![docs, review]
}
