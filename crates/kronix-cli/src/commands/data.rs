//! Backup, restore and factory reset.

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use super::{open, print_json, CliResult};
use crate::terminal::Prompt;

#[derive(Subcommand)]
pub enum DataAction {
    /// Write every collection to a backup file
    Export {
        /// Directory to write into (default: current directory)
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Replace collections from a backup file
    Import {
        /// Backup file
        file: PathBuf,
    },
    /// Wipe all local data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    let (mut kronix, config) = open()?;

    match action {
        DataAction::Export { dir } => {
            let path = kronix.write_export(&dir, &config.export.file_name)?;
            print_json(&json!({ "path": path }))?;
        }
        DataAction::Import { file } => {
            let summary = kronix.import_file(&file)?;
            print_json(&summary)?;
        }
        DataAction::Reset { yes } => {
            let reset = kronix.factory_reset(&mut Prompt::new(yes))?;
            print_json(&json!({ "reset": reset }))?;
        }
    }
    Ok(())
}
