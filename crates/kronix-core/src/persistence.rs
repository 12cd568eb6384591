//! Persistence gateway between the event store and a key-value backend.
//!
//! Each collection lives under its own namespaced key as a JSON array.
//! Saves are write-through: the caller saves the touched collection after
//! every mutation. Loads never fail; a corrupt or unreadable value falls
//! back to an empty collection. Imports parse the whole bundle before
//! anything is replaced.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ImportError, Result};
use crate::model::{Habit, SleepLog, Task};
use crate::storage::KeyValueBackend;
use crate::store::{Collection, Snapshot};

/// Prefix shared by every key this application owns.
pub const NAMESPACE: &str = "kronix_";
pub const TASKS_KEY: &str = "kronix_tasks";
pub const HABITS_KEY: &str = "kronix_habits";
pub const SLEEP_KEY: &str = "kronix_sleep";

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Tasks => TASKS_KEY,
            Collection::Habits => HABITS_KEY,
            Collection::Sleep => SLEEP_KEY,
        }
    }
}

/// Portable backup document.
///
/// Every key is optional on import; absent keys leave the matching
/// collection alone. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habits: Option<Vec<Habit>>,
    #[serde(default, rename = "sleepData", skip_serializing_if = "Option::is_none")]
    pub sleep_data: Option<SleepLog>,
}

impl Bundle {
    /// Parse and validate a bundle without touching any state.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ImportError::Invalid("expected a JSON object".into()));
        }
        let bundle: Bundle = serde_json::from_value(value)?;
        bundle.validate()?;
        Ok(bundle)
    }

    fn validate(&self) -> Result<(), ImportError> {
        if let Some(tasks) = &self.tasks {
            if let Some(task) = tasks.iter().find(|t| t.content.trim().is_empty()) {
                return Err(ImportError::Invalid(format!("task {} has no content", task.id)));
            }
            if let Some(id) = first_duplicate(tasks.iter().map(|t| t.id)) {
                return Err(ImportError::Invalid(format!("duplicate task id {id}")));
            }
        }
        if let Some(habits) = &self.habits {
            if let Some(habit) = habits.iter().find(|h| h.name.trim().is_empty()) {
                return Err(ImportError::Invalid(format!("habit {} has no name", habit.id)));
            }
            if let Some(id) = first_duplicate(habits.iter().map(|h| h.id)) {
                return Err(ImportError::Invalid(format!("duplicate habit id {id}")));
            }
        }
        Ok(())
    }

    /// Collections this bundle would replace.
    pub fn present(&self) -> Vec<Collection> {
        let mut present = Vec::new();
        if self.tasks.is_some() {
            present.push(Collection::Tasks);
        }
        if self.habits.is_some() {
            present.push(Collection::Habits);
        }
        if self.sleep_data.is_some() {
            present.push(Collection::Sleep);
        }
        present
    }
}

fn first_duplicate(ids: impl Iterator<Item = i64>) -> Option<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

fn encode(collection: Collection, snapshot: &Snapshot) -> Result<String> {
    let json = match collection {
        Collection::Tasks => serde_json::to_string(&*snapshot.tasks)?,
        Collection::Habits => serde_json::to_string(&*snapshot.habits)?,
        Collection::Sleep => serde_json::to_string(&*snapshot.sleep)?,
    };
    Ok(json)
}

/// What an import replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub tasks: Option<usize>,
    pub habits: Option<usize>,
    pub sleep_entries: Option<usize>,
}

#[derive(Serialize)]
struct BundleRef<'a> {
    tasks: &'a [Task],
    habits: &'a [Habit],
    #[serde(rename = "sleepData")]
    sleep_data: &'a SleepLog,
}

/// Reads and writes the store through a [`KeyValueBackend`].
pub struct Gateway<B> {
    backend: B,
}

impl<B: KeyValueBackend> Gateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Write one collection of `snapshot` to its key.
    pub fn save(&self, collection: Collection, snapshot: &Snapshot) -> Result<()> {
        let json = encode(collection, snapshot)?;
        self.backend.set(collection.key(), &json)?;
        tracing::debug!(key = collection.key(), bytes = json.len(), "saved collection");
        Ok(())
    }

    pub fn save_all(&self, snapshot: &Snapshot) -> Result<()> {
        for collection in Collection::ALL {
            self.save(collection, snapshot)?;
        }
        Ok(())
    }

    /// Read all three collections. Missing or corrupt values become empty.
    pub fn load(&self) -> Snapshot {
        Snapshot::new(
            self.load_key(TASKS_KEY),
            self.load_key(HABITS_KEY),
            self.load_key(SLEEP_KEY),
        )
    }

    fn load_key<T: serde::de::DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read stored collection, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored collection is corrupt, starting empty");
                T::default()
            }
        }
    }

    pub fn export_json(&self, snapshot: &Snapshot) -> Result<String> {
        let bundle = BundleRef {
            tasks: &snapshot.tasks,
            habits: &snapshot.habits,
            sleep_data: &snapshot.sleep,
        };
        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    pub fn export_all(&self, snapshot: &Snapshot) -> Bundle {
        Bundle {
            tasks: Some(snapshot.tasks.to_vec()),
            habits: Some(snapshot.habits.to_vec()),
            sleep_data: Some((*snapshot.sleep).clone()),
        }
    }

    /// Write the export bundle as `dir/file_name` and return its path.
    pub fn write_export(&self, snapshot: &Snapshot, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        std::fs::write(&path, self.export_json(snapshot)?)?;
        tracing::info!(path = %path.display(), "exported backup");
        Ok(path)
    }

    /// Apply `text` on top of `current`, then write the replaced
    /// collections through.
    ///
    /// All replaced keys are written in one `set_many`. On any error
    /// nothing is written and `current` stays valid.
    pub fn import_all(&self, current: &Snapshot, text: &str) -> Result<(Snapshot, ImportSummary)> {
        let bundle = Bundle::parse(text)?;
        let replaced = bundle.present();
        let mut next = current.clone();
        let mut summary = ImportSummary::default();

        if let Some(tasks) = bundle.tasks {
            summary.tasks = Some(tasks.len());
            next.tasks = tasks.into();
        }
        if let Some(habits) = bundle.habits {
            summary.habits = Some(habits.len());
            next.habits = habits.into();
        }
        if let Some(sleep) = bundle.sleep_data {
            summary.sleep_entries = Some(sleep.len());
            next.sleep = sleep.into();
        }

        let mut entries = Vec::new();
        for collection in replaced {
            entries.push((collection.key(), encode(collection, &next)?));
        }
        self.backend.set_many(&entries)?;
        tracing::info!(?summary, "imported backup");
        Ok((next, summary))
    }

    /// Read `path` fully, then import it.
    pub fn import_file(&self, current: &Snapshot, path: &Path) -> Result<(Snapshot, ImportSummary)> {
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_all(current, &text)
    }

    /// Erase every key in the application namespace.
    pub fn reset_all(&self) -> Result<usize> {
        let removed = self.backend.clear_prefix(NAMESPACE).map_err(CoreError::from)?;
        tracing::info!(removed, "factory reset");
        Ok(removed)
    }
}
