pub mod config;
pub mod data;
pub mod habit;
pub mod sleep;
pub mod stats;
pub mod task;
pub mod timer;

use kronix_core::{Config, Database, Kronix};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store with the user's config.
pub fn open() -> Result<(Kronix<Database>, Config), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    Ok((Kronix::open(db, &config), config))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
