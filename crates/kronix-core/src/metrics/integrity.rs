//! System integrity scores.
//!
//! Five 0-100 scores summarize the store. Each one is 0, never NaN, when
//! there is nothing to measure.

use serde::{Deserialize, Serialize};

use crate::model::{Habit, SleepLog, Task};

/// Nightly hours that count as full recovery unless configured otherwise.
pub const DEFAULT_SLEEP_TARGET_HOURS: f64 = 8.0;

/// Score categories in canonical order; ties resolve to the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Output,
    Discipline,
    Recovery,
    Consistency,
    Endurance,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Output,
        Category::Discipline,
        Category::Recovery,
        Category::Consistency,
        Category::Endurance,
    ];

    /// How to raise this score.
    pub fn instruction(self) -> &'static str {
        match self {
            Category::Output => "Increase completion of side missions and tasks.",
            Category::Discipline => "Complete critical protocols daily.",
            Category::Recovery => "Maintain 7-8 hours of sleep.",
            Category::Consistency => "Check in habits daily on the grid.",
            Category::Endurance => "Combine high discipline with high recovery.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub category: Category,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Optimal,
    Stable,
    MaintenanceRequired,
    Critical,
}

impl Status {
    pub fn from_average(average: u8) -> Self {
        match average {
            90.. => Status::Optimal,
            70..=89 => Status::Stable,
            50..=69 => Status::MaintenanceRequired,
            _ => Status::Critical,
        }
    }

    /// Critical status keeps the persistent alert on.
    pub fn is_alert(self) -> bool {
        self == Status::Critical
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Optimal => "SYSTEM OPTIMAL",
            Status::Stable => "SYSTEM STABLE",
            Status::MaintenanceRequired => "MAINTENANCE REQUIRED",
            Status::Critical => "CRITICAL FAILURE",
        }
    }
}

/// `round(100 * part / whole)`, or 0 for an empty whole, capped at 100.
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    clamp_pct((part as f64 / whole as f64) * 100.0)
}

fn clamp_pct(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

pub fn output_score(tasks: &[Task]) -> u8 {
    percent(tasks.iter().filter(|t| t.is_done).count(), tasks.len())
}

pub fn discipline_score(tasks: &[Task]) -> u8 {
    let mandatory: Vec<&Task> = tasks.iter().filter(|t| t.is_mandatory).collect();
    percent(mandatory.iter().filter(|t| t.is_done).count(), mandatory.len())
}

pub fn recovery_score(sleep: &SleepLog, target_hours: f64) -> u8 {
    if sleep.is_empty() || target_hours <= 0.0 {
        return 0;
    }
    clamp_pct(sleep.average_hours() / target_hours * 100.0)
}

pub fn consistency_score(habits: &[Habit]) -> u8 {
    if habits.is_empty() {
        return 0;
    }
    let total: f64 = habits.iter().map(Habit::completion_ratio).sum();
    clamp_pct(total / habits.len() as f64 * 100.0)
}

pub fn endurance_score(discipline: u8, recovery: u8) -> u8 {
    clamp_pct((f64::from(discipline) + f64::from(recovery)) / 2.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// In canonical category order.
    pub scores: [Score; 5],
    /// `round(sum / 5)`.
    pub average: u8,
    pub status: Status,
    pub alert: bool,
    pub weakest: Score,
}

impl IntegrityReport {
    pub fn compute(tasks: &[Task], habits: &[Habit], sleep: &SleepLog, sleep_target_hours: f64) -> Self {
        let discipline = discipline_score(tasks);
        let recovery = recovery_score(sleep, sleep_target_hours);
        let values = [
            output_score(tasks),
            discipline,
            recovery,
            consistency_score(habits),
            endurance_score(discipline, recovery),
        ];
        Self::from_values(values)
    }

    /// Build the report from raw category values in canonical order.
    pub fn from_values(values: [u8; 5]) -> Self {
        let scores = [0, 1, 2, 3, 4].map(|i| Score {
            category: Category::ALL[i],
            value: values[i],
        });
        let sum: u32 = values.iter().map(|v| u32::from(*v)).sum();
        let average = clamp_pct(f64::from(sum) / 5.0);
        let status = Status::from_average(average);
        Self {
            scores,
            average,
            status,
            alert: status.is_alert(),
            weakest: weakest_link(&scores),
        }
    }

    pub fn get(&self, category: Category) -> u8 {
        self.scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.value)
            .unwrap_or(0)
    }
}

/// Lowest score; the first in canonical order wins a tie.
pub fn weakest_link(scores: &[Score; 5]) -> Score {
    let mut weakest = scores[0];
    for score in &scores[1..] {
        if score.value < weakest.value {
            weakest = *score;
        }
    }
    weakest
}
