//! Records kept by the event store: tasks, habits and sleep nights.

mod habit;
mod sleep;
mod task;

pub use habit::{DaySet, Habit, MONTH_DAYS};
pub use sleep::{SleepEntry, SleepLog, SleepOutcome, SLEEP_LOG_CAP};
pub use task::{Task, CRITICAL_WEIGHT, SIDE_WEIGHT};
