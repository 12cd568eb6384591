use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;

use super::{open, print_json, CliResult};

#[derive(Subcommand)]
pub enum SleepAction {
    /// Log hours slept (1-10 is the usual range)
    Log {
        /// Hours slept
        hours: f64,
        /// Night to log against (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List the logged nights, oldest first
    List,
}

pub fn run(action: SleepAction) -> CliResult {
    let (mut kronix, _config) = open()?;

    match action {
        SleepAction::Log { hours, date } => {
            let day = date.unwrap_or_else(|| kronix.today());
            let outcome = kronix.log_sleep_on(day, hours)?;
            print_json(&json!({ "day": day, "hours": hours, "result": outcome }))?;
        }
        SleepAction::List => {
            let snapshot = kronix.snapshot();
            print_json(snapshot.sleep.entries())?;
        }
    }
    Ok(())
}
