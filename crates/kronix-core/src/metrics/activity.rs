//! Seven-day XP series.

use chrono::{Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::model::Task;

/// Number of days in the activity and sleep charts.
pub const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityBucket {
    pub date: NaiveDate,
    /// Weekday short name, e.g. "Mon".
    pub label: String,
    pub xp: u32,
}

/// The window's dates, oldest first, ending at `today`.
pub fn window(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..WINDOW_DAYS).map(move |i| today - Duration::days(WINDOW_DAYS - 1 - i))
}

pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// XP earned per calendar day over the last week.
///
/// A done task counts toward the bucket whose date equals its creation
/// date in `tz`. Tasks outside the window are ignored, and list order does
/// not matter.
pub fn activity_series<Tz: TimeZone>(tasks: &[Task], today: NaiveDate, tz: &Tz) -> Vec<ActivityBucket> {
    let mut buckets: Vec<ActivityBucket> = window(today)
        .map(|date| ActivityBucket {
            date,
            label: weekday_label(date),
            xp: 0,
        })
        .collect();

    for task in tasks.iter().filter(|t| t.is_done) {
        let day = task.created_on(tz);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == day) {
            bucket.xp += task.weight();
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn today() -> NaiveDate {
        // A Monday.
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn task(id: i64, day: u32, hour: u32, mandatory: bool, done: bool) -> Task {
        let at: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap();
        let mut t = Task::new(id, format!("t{id}"), mandatory, at);
        t.is_done = done;
        t
    }

    #[test]
    fn seven_chronological_buckets() {
        let series = activity_series(&[], today(), &Utc);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 10, 13).unwrap());
        assert_eq!(series[6].date, today());
        assert_eq!(series[0].label, "Tue");
        assert_eq!(series[6].label, "Mon");
        assert!(series.iter().all(|b| b.xp == 0));
    }

    #[test]
    fn weights_done_tasks_by_creation_day() {
        let tasks = vec![
            task(1, 19, 8, true, true),
            task(2, 19, 22, false, true),
            task(3, 19, 9, true, false),
            task(4, 15, 12, false, true),
            task(5, 12, 12, true, true),
        ];
        let series = activity_series(&tasks, today(), &Utc);
        assert_eq!(series[6].xp, 35);
        assert_eq!(series[2].xp, 10);
        assert_eq!(series.iter().map(|b| b.xp).sum::<u32>(), 45);
    }
}
