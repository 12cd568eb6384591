use clap::Subcommand;
use kronix_core::metrics::HabitStats;
use serde_json::json;

use super::{open, print_json, CliResult};
use crate::terminal::Prompt;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Start tracking a habit
    Add {
        /// Habit name
        name: String,
    },
    /// List habits with their monthly efficiency
    List,
    /// Mark or unmark one day of the month
    Toggle {
        /// Habit ID
        id: i64,
        /// Day of month (1-31)
        day: u32,
    },
    /// Stop tracking a habit
    Delete {
        /// Habit ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let (mut kronix, _config) = open()?;

    match action {
        HabitAction::Add { name } => match kronix.add_habit(&name)? {
            Some(id) => {
                let snapshot = kronix.snapshot();
                print_json(&snapshot.habit(id))?;
            }
            None => print_json(&json!({ "added": false }))?,
        },
        HabitAction::List => {
            let snapshot = kronix.snapshot();
            let rows: Vec<_> = snapshot
                .habits
                .iter()
                .map(|habit| {
                    let stats = HabitStats::compute(habit);
                    json!({
                        "id": habit.id,
                        "name": habit.name,
                        "completed_days": habit.completed_days,
                        "total": stats.total,
                        "efficiency": stats.efficiency,
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Toggle { id, day } => {
            let marked = kronix.toggle_habit_day(id, day)?;
            print_json(&json!({ "id": id, "day": day, "marked": marked }))?;
        }
        HabitAction::Delete { id, yes } => {
            let removed = kronix.delete_habit(id, &mut Prompt::new(yes))?;
            print_json(&json!({ "deleted": removed.is_some(), "habit": removed }))?;
        }
    }
    Ok(())
}
