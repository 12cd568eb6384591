use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity::{weekday_label, window};
use super::integrity::percent;
use crate::model::{Habit, SleepLog, Task, MONTH_DAYS};

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub completed: usize,
    pub pending: usize,
    pub progress_pct: u8,
    pub total_xp: u32,
    pub level: u32,
}

impl TaskSummary {
    pub fn compute(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.is_done).count();
        let total_xp: u32 = tasks.iter().map(Task::earned_xp).sum();
        Self {
            completed,
            pending: tasks.len() - completed,
            progress_pct: percent(completed, tasks.len()),
            total_xp,
            level: total_xp / XP_PER_LEVEL + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    pub id: i64,
    pub name: String,
    /// `round(100 * marked / 31)`.
    pub efficiency: u8,
    pub total: u32,
}

impl HabitStats {
    pub fn compute(habit: &Habit) -> Self {
        let total = habit.completed_days.len();
        Self {
            id: habit.id,
            name: habit.name.clone(),
            efficiency: percent(total as usize, MONTH_DAYS as usize),
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepPoint {
    pub date: NaiveDate,
    pub label: String,
    /// 0 when nothing was logged that day.
    pub hours: f64,
}

/// One point per day of the last week, oldest first.
pub fn sleep_series(sleep: &SleepLog, today: NaiveDate) -> Vec<SleepPoint> {
    window(today)
        .map(|date| SleepPoint {
            date,
            label: weekday_label(date),
            hours: sleep.get(date).unwrap_or(0.0),
        })
        .collect()
}
