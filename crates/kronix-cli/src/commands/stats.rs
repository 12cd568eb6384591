use clap::Subcommand;

use super::{open, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Everything the overview shows
    Dashboard,
    /// The five integrity scores, status and weakest link
    Integrity,
    /// XP earned per day over the last week
    Activity,
}

pub fn run(action: StatsAction) -> CliResult {
    let (mut kronix, _config) = open()?;
    let dashboard = kronix.dashboard();

    match action {
        StatsAction::Dashboard => print_json(&*dashboard)?,
        StatsAction::Integrity => print_json(&dashboard.integrity)?,
        StatsAction::Activity => print_json(&dashboard.activity)?,
    }
    Ok(())
}
