//! Derivation engine.
//!
//! Pure functions from a [`Snapshot`] and the current date to the numbers
//! the dashboard shows: the seven-day activity series, the five integrity
//! scores with their status, task and habit summaries, and the sleep chart.
//! Nothing here touches the store.

mod activity;
mod cache;
mod integrity;
mod summary;

pub use activity::{activity_series, weekday_label, ActivityBucket, WINDOW_DAYS};
pub use cache::DerivationCache;
pub use integrity::{
    consistency_score, discipline_score, endurance_score, output_score, recovery_score,
    weakest_link, Category, IntegrityReport, Score, Status, DEFAULT_SLEEP_TARGET_HOURS,
};
pub use summary::{sleep_series, HabitStats, SleepPoint, TaskSummary, XP_PER_LEVEL};

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::store::Snapshot;

/// Everything the overview screen needs, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub integrity: IntegrityReport,
    pub activity: Vec<ActivityBucket>,
    pub tasks: TaskSummary,
    pub habits: Vec<HabitStats>,
    pub sleep: Vec<SleepPoint>,
    pub today_sleep: Option<f64>,
}

impl Dashboard {
    pub fn compute<Tz: TimeZone>(
        snapshot: &Snapshot,
        today: NaiveDate,
        tz: &Tz,
        sleep_target_hours: f64,
    ) -> Self {
        Self {
            today,
            integrity: IntegrityReport::compute(
                &snapshot.tasks,
                &snapshot.habits,
                &snapshot.sleep,
                sleep_target_hours,
            ),
            activity: activity_series(&snapshot.tasks, today, tz),
            tasks: TaskSummary::compute(&snapshot.tasks),
            habits: snapshot.habits.iter().map(HabitStats::compute).collect(),
            sleep: sleep_series(&snapshot.sleep, today),
            today_sleep: snapshot.sleep.get(today),
        }
    }
}
