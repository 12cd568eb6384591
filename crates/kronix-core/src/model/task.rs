use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// XP weight of a completed critical protocol.
pub const CRITICAL_WEIGHT: u32 = 25;
/// XP weight of a completed side task.
pub const SIDE_WEIGHT: u32 = 10;

/// A tracked task.
///
/// `is_mandatory` marks a critical protocol; it is fixed at creation, as is
/// `content`. Only `is_done` changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub is_mandatory: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: i64, content: impl Into<String>, is_mandatory: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            is_done: false,
            is_mandatory,
            created_at,
        }
    }

    pub fn weight(&self) -> u32 {
        if self.is_mandatory {
            CRITICAL_WEIGHT
        } else {
            SIDE_WEIGHT
        }
    }

    /// Weight earned so far: the full weight once done, zero otherwise.
    pub fn earned_xp(&self) -> u32 {
        if self.is_done {
            self.weight()
        } else {
            0
        }
    }

    /// Calendar day of creation as seen from `tz`.
    pub fn created_on<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }
}
