//! # Kronix Core Library
//!
//! Business logic for the Kronix personal dashboard: tasks, a monthly habit
//! grid, a sleep log, a focus timer, and the "system integrity" scores
//! derived from them. The `kronix` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Event Store**: immutable snapshots of the three collections
//! - **Persistence Gateway**: write-through saves to a key-value backend
//!   (SQLite by default), tolerant loads, backup export/import, reset
//! - **Derivation Engine**: pure, memoized scores and chart series
//! - **Timer**: tick-driven focus countdown plus a tokio driver
//!
//! ## Key Components
//!
//! - [`Kronix`]: application facade used by front ends
//! - [`EventStore`]: collections and their invariants
//! - [`Gateway`]: persistence over any [`KeyValueBackend`]
//! - [`Dashboard`]: derived view model
//! - [`FocusTimer`]: timer state machine

pub mod app;
pub mod error;
pub mod events;
pub mod metrics;
pub mod model;
pub mod notify;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod timer;

pub use app::{Confirm, Kronix};
pub use error::{ConfigError, CoreError, ImportError, StorageError, ValidationError};
pub use events::Event;
pub use metrics::{Dashboard, DerivationCache, IntegrityReport, Status};
pub use model::{DaySet, Habit, SleepEntry, SleepLog, SleepOutcome, Task};
pub use notify::{Notifier, Permission};
pub use persistence::{Bundle, Gateway, ImportSummary};
pub use storage::{Config, Database, KeyValueBackend, MemoryBackend};
pub use store::{Collection, EventStore, Snapshot};
pub use timer::{FocusTimer, SessionOutcome, TimerDriver, TimerMode, TimerState};
