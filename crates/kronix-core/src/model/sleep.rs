use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum number of nights kept in the log.
pub const SLEEP_LOG_CAP: usize = 7;

/// Hours slept on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub day: NaiveDate,
    pub hours: f64,
}

/// What `SleepLog::log` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SleepOutcome {
    Inserted,
    Updated,
    /// Inserted, and the oldest night was dropped to stay within the cap.
    Evicted { evicted: NaiveDate },
}

/// Recent nights, oldest first.
///
/// Holds at most one entry per day and at most [`SLEEP_LOG_CAP`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SleepEntry>", into = "Vec<SleepEntry>")]
pub struct SleepLog {
    entries: Vec<SleepEntry>,
}

fn check_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours(hours))
    }
}

impl SleepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from foreign data.
    ///
    /// Repeated days keep their first position with the last value seen;
    /// afterwards only the newest [`SLEEP_LOG_CAP`] entries survive.
    pub fn from_entries(entries: impl IntoIterator<Item = SleepEntry>) -> Result<Self, ValidationError> {
        let mut log = Self::new();
        for entry in entries {
            check_hours(entry.hours)?;
            match log.entries.iter_mut().find(|e| e.day == entry.day) {
                Some(existing) => existing.hours = entry.hours,
                None => log.entries.push(entry),
            }
        }
        let excess = log.entries.len().saturating_sub(SLEEP_LOG_CAP);
        log.entries.drain(..excess);
        Ok(log)
    }

    /// Record `hours` for `day`, updating in place if the day is present.
    pub fn log(&mut self, day: NaiveDate, hours: f64) -> Result<SleepOutcome, ValidationError> {
        check_hours(hours)?;
        if let Some(existing) = self.entries.iter_mut().find(|e| e.day == day) {
            existing.hours = hours;
            return Ok(SleepOutcome::Updated);
        }
        self.entries.push(SleepEntry { day, hours });
        if self.entries.len() > SLEEP_LOG_CAP {
            let evicted = self.entries.remove(0);
            return Ok(SleepOutcome::Evicted { evicted: evicted.day });
        }
        Ok(SleepOutcome::Inserted)
    }

    pub fn get(&self, day: NaiveDate) -> Option<f64> {
        self.entries.iter().find(|e| e.day == day).map(|e| e.hours)
    }

    pub fn entries(&self) -> &[SleepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean hours over every stored night; 0 when empty.
    pub fn average_hours(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|e| e.hours).sum::<f64>() / self.entries.len() as f64
    }
}

impl TryFrom<Vec<SleepEntry>> for SleepLog {
    type Error = ValidationError;

    fn try_from(entries: Vec<SleepEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<SleepLog> for Vec<SleepEntry> {
    fn from(log: SleepLog) -> Self {
        log.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn same_day_updates_in_place() {
        let mut log = SleepLog::new();
        assert_eq!(log.log(day(1), 6.0).unwrap(), SleepOutcome::Inserted);
        assert_eq!(log.log(day(2), 7.0).unwrap(), SleepOutcome::Inserted);
        assert_eq!(log.log(day(1), 8.0).unwrap(), SleepOutcome::Updated);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].day, day(1));
        assert_eq!(log.get(day(1)), Some(8.0));
    }

    #[test]
    fn eighth_day_evicts_oldest() {
        let mut log = SleepLog::new();
        for d in 1..=7 {
            log.log(day(d), 7.0).unwrap();
        }
        let outcome = log.log(day(8), 5.0).unwrap();
        assert_eq!(outcome, SleepOutcome::Evicted { evicted: day(1) });
        assert_eq!(log.len(), SLEEP_LOG_CAP);
        assert_eq!(log.get(day(1)), None);
        assert_eq!(log.entries().last().unwrap().day, day(8));
    }

    #[test]
    fn rejects_negative_and_nan_hours() {
        let mut log = SleepLog::new();
        assert!(log.log(day(1), -1.0).is_err());
        assert!(log.log(day(1), f64::NAN).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn from_entries_normalizes_duplicates_and_cap() {
        let mut raw: Vec<SleepEntry> = (1..=9).map(|d| SleepEntry { day: day(d), hours: 6.0 }).collect();
        raw.push(SleepEntry { day: day(9), hours: 9.0 });
        let log = SleepLog::from_entries(raw).unwrap();
        assert_eq!(log.len(), 7);
        assert_eq!(log.entries()[0].day, day(3));
        assert_eq!(log.get(day(9)), Some(9.0));
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(SleepLog::new().average_hours(), 0.0);
    }

    #[test]
    fn deserializes_from_plain_array() {
        let log: SleepLog =
            serde_json::from_str(r#"[{"day":"2026-10-01","hours":8},{"day":"2026-10-02","hours":4}]"#).unwrap();
        assert_eq!(log.average_hours(), 6.0);
        assert!(serde_json::from_str::<SleepLog>(r#"[{"day":"Mon","hours":8}]"#).is_err());
    }
}
