mod config;
pub mod database;

pub use config::{Config, ExportConfig, MetricsConfig, NotificationsConfig, TimerConfig};
pub use database::{Database, MemoryBackend};

use std::path::PathBuf;

use crate::error::StorageError;

/// Durable string key-value storage.
///
/// The gateway writes one JSON value per collection key; backends only
/// need to store and enumerate opaque strings.
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Write every pair or none of them.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;
    /// Delete every key starting with `prefix`. Returns how many went away.
    fn clear_prefix(&self, prefix: &str) -> Result<usize, StorageError>;
}

/// Returns the Kronix data directory, creating it if needed.
///
/// `KRONIX_DATA_DIR` overrides the location outright. Otherwise it is
/// `~/.config/kronix/`, or `~/.config/kronix-dev/` when `KRONIX_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("KRONIX_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("KRONIX_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("kronix-dev")
            } else {
                base_dir.join("kronix")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
