//! In-memory event store.
//!
//! The store keeps three collections behind `Arc`s. Every mutation builds a
//! new collection value and swaps it in, so a [`Snapshot`] taken earlier is
//! never affected by later changes. Each mutation reports the
//! [`Collection`] it touched; the caller writes that one through to storage.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::{Habit, SleepLog, SleepOutcome, Task};

/// One of the three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Tasks,
    Habits,
    Sleep,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Tasks, Collection::Habits, Collection::Sleep];
}

/// Immutable view of the store at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Newest first.
    pub tasks: Arc<Vec<Task>>,
    /// Creation order.
    pub habits: Arc<Vec<Habit>>,
    pub sleep: Arc<SleepLog>,
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>, habits: Vec<Habit>, sleep: SleepLog) -> Self {
        Self {
            tasks: Arc::new(tasks),
            habits: Arc::new(habits),
            sleep: Arc::new(sleep),
        }
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn habit(&self, id: i64) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }
}

/// Next creation-ordered id: the timestamp, bumped past any existing id.
fn next_id(at: DateTime<Utc>, existing: impl Iterator<Item = i64>) -> i64 {
    let ms = at.timestamp_millis();
    match existing.max() {
        Some(max) if max >= ms => max + 1,
        _ => ms,
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    current: Snapshot,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { current: snapshot }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.current.tasks
    }

    pub fn habits(&self) -> &[Habit] {
        &self.current.habits
    }

    pub fn sleep(&self) -> &SleepLog {
        &self.current.sleep
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Prepend a new task. Blank content is ignored and yields `None`.
    pub fn add_task(&mut self, content: &str, is_mandatory: bool, at: DateTime<Utc>) -> Option<i64> {
        let content = non_blank(content)?;
        let id = next_id(at, self.current.tasks.iter().map(|t| t.id));
        let mut tasks = Vec::with_capacity(self.current.tasks.len() + 1);
        tasks.push(Task::new(id, content, is_mandatory, at));
        tasks.extend(self.current.tasks.iter().cloned());
        self.current.tasks = Arc::new(tasks);
        Some(id)
    }

    /// Flip `is_done`. Returns the new value.
    pub fn toggle_task(&mut self, id: i64) -> Result<bool> {
        let mut tasks = (*self.current.tasks).clone();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::NotFound { kind: "task", id })?;
        task.is_done = !task.is_done;
        let done = task.is_done;
        self.current.tasks = Arc::new(tasks);
        Ok(done)
    }

    pub fn remove_task(&mut self, id: i64) -> Result<Task> {
        let pos = self
            .current
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::NotFound { kind: "task", id })?;
        let mut tasks = (*self.current.tasks).clone();
        let removed = tasks.remove(pos);
        self.current.tasks = Arc::new(tasks);
        Ok(removed)
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.current.tasks = Arc::new(tasks);
    }

    // ── Habits ───────────────────────────────────────────────────────

    /// Append a new habit. Blank names are ignored and yield `None`.
    pub fn add_habit(&mut self, name: &str, at: DateTime<Utc>) -> Option<i64> {
        let name = non_blank(name)?;
        let id = next_id(at, self.current.habits.iter().map(|h| h.id));
        let mut habits = (*self.current.habits).clone();
        habits.push(Habit::new(id, name));
        self.current.habits = Arc::new(habits);
        Some(id)
    }

    /// Flip the mark for `day`. Returns whether the day is now marked.
    pub fn toggle_habit_day(&mut self, id: i64, day: u32) -> Result<bool> {
        let mut habits = (*self.current.habits).clone();
        let habit = habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(CoreError::NotFound { kind: "habit", id })?;
        let marked = habit.completed_days.toggle(day)?;
        self.current.habits = Arc::new(habits);
        Ok(marked)
    }

    pub fn remove_habit(&mut self, id: i64) -> Result<Habit> {
        let pos = self
            .current
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(CoreError::NotFound { kind: "habit", id })?;
        let mut habits = (*self.current.habits).clone();
        let removed = habits.remove(pos);
        self.current.habits = Arc::new(habits);
        Ok(removed)
    }

    pub fn replace_habits(&mut self, habits: Vec<Habit>) {
        self.current.habits = Arc::new(habits);
    }

    // ── Sleep ────────────────────────────────────────────────────────

    pub fn log_sleep(&mut self, day: NaiveDate, hours: f64) -> Result<SleepOutcome> {
        let mut sleep = (*self.current.sleep).clone();
        let outcome = sleep.log(day, hours)?;
        self.current.sleep = Arc::new(sleep);
        Ok(outcome)
    }

    pub fn replace_sleep(&mut self, sleep: SleepLog) {
        self.current.sleep = Arc::new(sleep);
    }
}
