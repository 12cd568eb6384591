//! Protocol (task) commands.

use clap::Subcommand;
use serde_json::json;

use super::{open, print_json, CliResult};
use crate::terminal::Prompt;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        content: String,
        /// Critical protocol (25 XP instead of 10)
        #[arg(long)]
        critical: bool,
    },
    /// List tasks, newest first
    List,
    /// Flip a task between done and pending
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let (mut kronix, _config) = open()?;

    match action {
        TaskAction::Add { content, critical } => match kronix.add_task(&content, critical)? {
            Some(id) => {
                let snapshot = kronix.snapshot();
                print_json(&snapshot.task(id))?;
            }
            None => print_json(&json!({ "added": false }))?,
        },
        TaskAction::List => print_json(&*kronix.snapshot().tasks)?,
        TaskAction::Toggle { id } => {
            let is_done = kronix.toggle_task(id)?;
            print_json(&json!({ "id": id, "is_done": is_done }))?;
        }
        TaskAction::Delete { id, yes } => {
            let removed = kronix.delete_task(id, &mut Prompt::new(yes))?;
            print_json(&json!({ "deleted": removed.is_some(), "task": removed }))?;
        }
    }
    Ok(())
}
