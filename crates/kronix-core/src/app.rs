//! Application facade.
//!
//! [`Kronix`] is what a front end talks to. Each user action mutates the
//! event store, writes the touched collection through the gateway, and
//! leaves the dashboard to be re-derived lazily through the cache.
//! Destructive actions ask a [`Confirm`] first.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::error::{CoreError, Result};
use crate::metrics::{Dashboard, DerivationCache};
use crate::model::{Habit, SleepOutcome, Task};
use crate::persistence::{Gateway, ImportSummary};
use crate::storage::{Config, KeyValueBackend};
use crate::store::{Collection, EventStore, Snapshot};

pub const DELETE_TASK_PROMPT: &str = "Delete protocol?";
pub const DELETE_HABIT_PROMPT: &str = "Stop tracking?";
pub const RESET_PROMPT: &str = "WARNING: THIS WILL WIPE ALL LOCAL DATA. PROCEED?";

/// Out-of-band yes/no question asked before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct Kronix<B, Tz: TimeZone = Local> {
    store: EventStore,
    gateway: Gateway<B>,
    cache: DerivationCache<Tz>,
    tz: Tz,
}

impl<B: KeyValueBackend> Kronix<B, Local> {
    /// Load state from `backend` using the local timezone.
    pub fn open(backend: B, config: &Config) -> Self {
        Self::with_timezone(backend, Local, config.metrics.sleep_target_hours)
    }
}

impl<B: KeyValueBackend, Tz: TimeZone> Kronix<B, Tz> {
    pub fn with_timezone(backend: B, tz: Tz, sleep_target_hours: f64) -> Self {
        let gateway = Gateway::new(backend);
        let store = EventStore::from_snapshot(gateway.load());
        Self {
            store,
            gateway,
            cache: DerivationCache::with_sleep_target(tz.clone(), sleep_target_hours),
            tz,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn gateway(&self) -> &Gateway<B> {
        &self.gateway
    }

    /// Current calendar date in this instance's timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// Save `collection` from `next`, then make `next` current. On a
    /// failed save the current store is left as it was.
    fn commit(&mut self, collection: Collection, next: EventStore) -> Result<()> {
        self.gateway.save(collection, &next.snapshot())?;
        self.store = next;
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task now. Blank content is a no-op returning `None`.
    pub fn add_task(&mut self, content: &str, is_mandatory: bool) -> Result<Option<i64>> {
        self.add_task_at(content, is_mandatory, Utc::now())
    }

    pub fn add_task_at(&mut self, content: &str, is_mandatory: bool, at: DateTime<Utc>) -> Result<Option<i64>> {
        let mut next = self.store.clone();
        let Some(id) = next.add_task(content, is_mandatory, at) else {
            return Ok(None);
        };
        self.commit(Collection::Tasks, next)?;
        Ok(Some(id))
    }

    pub fn toggle_task(&mut self, id: i64) -> Result<bool> {
        let mut next = self.store.clone();
        let done = next.toggle_task(id)?;
        self.commit(Collection::Tasks, next)?;
        Ok(done)
    }

    /// Delete after confirmation. `Ok(None)` means the user declined.
    pub fn delete_task(&mut self, id: i64, confirm: &mut impl Confirm) -> Result<Option<Task>> {
        if self.store.snapshot().task(id).is_none() {
            return Err(CoreError::NotFound { kind: "task", id });
        }
        if !confirm.confirm(DELETE_TASK_PROMPT) {
            return Ok(None);
        }
        let mut next = self.store.clone();
        let removed = next.remove_task(id)?;
        self.commit(Collection::Tasks, next)?;
        Ok(Some(removed))
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn add_habit(&mut self, name: &str) -> Result<Option<i64>> {
        let mut next = self.store.clone();
        let Some(id) = next.add_habit(name, Utc::now()) else {
            return Ok(None);
        };
        self.commit(Collection::Habits, next)?;
        Ok(Some(id))
    }

    pub fn toggle_habit_day(&mut self, id: i64, day: u32) -> Result<bool> {
        let mut next = self.store.clone();
        let marked = next.toggle_habit_day(id, day)?;
        self.commit(Collection::Habits, next)?;
        Ok(marked)
    }

    pub fn delete_habit(&mut self, id: i64, confirm: &mut impl Confirm) -> Result<Option<Habit>> {
        if self.store.snapshot().habit(id).is_none() {
            return Err(CoreError::NotFound { kind: "habit", id });
        }
        if !confirm.confirm(DELETE_HABIT_PROMPT) {
            return Ok(None);
        }
        let mut next = self.store.clone();
        let removed = next.remove_habit(id)?;
        self.commit(Collection::Habits, next)?;
        Ok(Some(removed))
    }

    // ── Sleep ────────────────────────────────────────────────────────

    /// Log last night's sleep against today's date.
    pub fn log_sleep(&mut self, hours: f64) -> Result<SleepOutcome> {
        let today = self.today();
        self.log_sleep_on(today, hours)
    }

    pub fn log_sleep_on(&mut self, day: NaiveDate, hours: f64) -> Result<SleepOutcome> {
        let mut next = self.store.clone();
        let outcome = next.log_sleep(day, hours)?;
        self.commit(Collection::Sleep, next)?;
        Ok(outcome)
    }

    // ── Data management ──────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String> {
        self.gateway.export_json(&self.store.snapshot())
    }

    pub fn write_export(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        self.gateway.write_export(&self.store.snapshot(), dir, file_name)
    }

    /// Apply a backup document. On error nothing changes.
    pub fn import_str(&mut self, text: &str) -> Result<ImportSummary> {
        let (next, summary) = self.gateway.import_all(&self.store.snapshot(), text)?;
        self.store = EventStore::from_snapshot(next);
        Ok(summary)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let (next, summary) = self.gateway.import_file(&self.store.snapshot(), path)?;
        self.store = EventStore::from_snapshot(next);
        Ok(summary)
    }

    /// Wipe every stored key and reload empty state, after confirmation.
    pub fn factory_reset(&mut self, confirm: &mut impl Confirm) -> Result<bool> {
        if !confirm.confirm(RESET_PROMPT) {
            return Ok(false);
        }
        self.gateway.reset_all()?;
        self.store = EventStore::from_snapshot(self.gateway.load());
        self.cache.invalidate();
        Ok(true)
    }

    // ── Derived view ─────────────────────────────────────────────────

    pub fn dashboard(&mut self) -> Arc<Dashboard> {
        let today = self.today();
        self.dashboard_on(today)
    }

    pub fn dashboard_on(&mut self, today: NaiveDate) -> Arc<Dashboard> {
        self.cache.dashboard(&self.store.snapshot(), today)
    }
}
